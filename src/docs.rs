//! Static documentation links exposed as MCP resources.
//!
//! Each entry maps an `expo://docs/...` URI to an external page. The
//! resource content is just a pointer to that page.

use serde::Serialize;

/// URI prefix shared by every documentation resource.
pub const URI_PREFIX: &str = "expo://docs/";

/// MIME type used when an entry does not set one.
pub const DEFAULT_MIME_TYPE: &str = "text/html";

/// A documentation resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocResource {
    /// Resource URI under `expo://docs/`.
    pub uri: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Short summary shown to the agent.
    pub description: &'static str,
    /// External page the resource points at.
    pub url: &'static str,
    /// MIME type override; `text/html` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<&'static str>,
}

/// Content returned when a documentation resource is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    /// External page URL.
    pub uri: &'static str,
    /// MIME type of the page.
    pub mime_type: &'static str,
}

impl DocResource {
    /// Registration name, e.g. `react-native-llms`.
    pub fn name(&self) -> String {
        resource_name(self.uri)
    }

    /// Effective MIME type.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type.unwrap_or(DEFAULT_MIME_TYPE)
    }

    /// Content descriptor pointing at the external page.
    pub fn content(&self) -> ResourceContent {
        ResourceContent {
            uri: self.url,
            mime_type: self.mime_type(),
        }
    }
}

/// Expo and EAS documentation.
pub const EXPO_DOCS: &[DocResource] = &[
    DocResource {
        uri: "expo://docs/llms",
        title: "Expo Documentation Index (LLM-optimized)",
        description: "Complete Expo documentation in LLM-optimized format with all major topics and guides",
        url: "https://docs.expo.dev/llms.txt",
        mime_type: Some("text/plain"),
    },
    DocResource {
        uri: "expo://docs/eas-build",
        title: "EAS Build Documentation",
        description: "Complete guide to EAS Build - cloud-based app compilation and signing for iOS and Android",
        url: "https://docs.expo.dev/build/introduction/",
        mime_type: None,
    },
    DocResource {
        uri: "expo://docs/eas-update",
        title: "EAS Update Documentation",
        description: "Guide to EAS Update - over-the-air updates for React Native apps",
        url: "https://docs.expo.dev/eas-update/introduction/",
        mime_type: None,
    },
    DocResource {
        uri: "expo://docs/eas-submit",
        title: "EAS Submit Documentation",
        description: "Guide to EAS Submit - automated app store submission for iOS and Android",
        url: "https://docs.expo.dev/submit/introduction/",
        mime_type: None,
    },
    DocResource {
        uri: "expo://docs/cli-reference",
        title: "Expo CLI Reference",
        description: "Complete reference for Expo CLI commands and options",
        url: "https://docs.expo.dev/more/expo-cli/",
        mime_type: None,
    },
    DocResource {
        uri: "expo://docs/development-builds",
        title: "Development Builds Guide",
        description: "Creating and using development builds - custom native apps for development and testing",
        url: "https://docs.expo.dev/develop/development-builds/introduction/",
        mime_type: None,
    },
    DocResource {
        uri: "expo://docs/programmatic-access",
        title: "Programmatic Access Documentation",
        description: "Guide to authentication and programmatic API access using access tokens",
        url: "https://docs.expo.dev/accounts/programmatic-access/",
        mime_type: None,
    },
    DocResource {
        uri: "expo://docs/config-plugins",
        title: "Config Plugins Documentation",
        description: "Guide to Expo config plugins - extending and customizing native project configuration",
        url: "https://docs.expo.dev/config-plugins/introduction/",
        mime_type: None,
    },
    DocResource {
        uri: "expo://docs/debugging",
        title: "Debugging Guide",
        description: "Comprehensive debugging guide for Expo apps - runtime issues, errors, and dev tools",
        url: "https://docs.expo.dev/debugging/runtime-issues/",
        mime_type: None,
    },
    DocResource {
        uri: "expo://docs/eas",
        title: "EAS Overview",
        description: "Overview of Expo Application Services (EAS) - Build, Update, Submit, and more",
        url: "https://docs.expo.dev/eas/",
        mime_type: None,
    },
];

/// React Native documentation.
pub const REACT_NATIVE_DOCS: &[DocResource] = &[
    DocResource {
        uri: "expo://docs/react-native/llms",
        title: "React Native Documentation Index (LLM-optimized)",
        description: "Complete React Native documentation in LLM-optimized format",
        url: "https://reactnative.dev/llms.txt",
        mime_type: Some("text/plain"),
    },
    DocResource {
        uri: "expo://docs/react-native/troubleshooting",
        title: "React Native Troubleshooting",
        description: "Common React Native issues and solutions",
        url: "https://reactnative.dev/docs/troubleshooting",
        mime_type: None,
    },
    DocResource {
        uri: "expo://docs/react-native/debugging",
        title: "React Native Debugging",
        description: "Guide to debugging React Native applications",
        url: "https://reactnative.dev/docs/debugging",
        mime_type: None,
    },
];

/// All documentation resources, Expo first.
pub fn all() -> impl Iterator<Item = &'static DocResource> {
    EXPO_DOCS.iter().chain(REACT_NATIVE_DOCS.iter())
}

/// Look up a resource by URI.
pub fn find(uri: &str) -> Option<&'static DocResource> {
    all().find(|doc| doc.uri == uri)
}

/// Derive a registration name from a resource URI.
pub fn resource_name(uri: &str) -> String {
    uri.replacen(URI_PREFIX, "", 1).replace('/', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resource_name() {
        assert_eq!(resource_name("expo://docs/eas-build"), "eas-build");
        assert_eq!(
            resource_name("expo://docs/react-native/troubleshooting"),
            "react-native-troubleshooting"
        );
    }

    #[test]
    fn test_table_is_consistent() {
        assert_eq!(all().count(), EXPO_DOCS.len() + REACT_NATIVE_DOCS.len());

        let mut uris = HashSet::new();
        let mut names = HashSet::new();
        for doc in all() {
            assert!(doc.uri.starts_with(URI_PREFIX), "{}", doc.uri);
            assert!(doc.url.starts_with("https://"), "{}", doc.url);
            assert!(uris.insert(doc.uri), "duplicate uri {}", doc.uri);
            assert!(names.insert(doc.name()), "duplicate name {}", doc.name());
        }
    }

    #[test]
    fn test_find() {
        let doc = find("expo://docs/eas-submit").unwrap();
        assert_eq!(doc.url, "https://docs.expo.dev/submit/introduction/");
        assert!(find("expo://docs/nope").is_none());
    }

    #[test]
    fn test_content_mime_type() {
        let llms = find("expo://docs/llms").unwrap().content();
        assert_eq!(llms.uri, "https://docs.expo.dev/llms.txt");
        assert_eq!(llms.mime_type, "text/plain");

        let build = find("expo://docs/eas-build").unwrap().content();
        assert_eq!(build.mime_type, DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(find("expo://docs/react-native/llms").unwrap()).unwrap();
        assert_eq!(json["mimeType"], "text/plain");

        let json = serde_json::to_value(find("expo://docs/eas").unwrap().content()).unwrap();
        assert_eq!(json["mimeType"], "text/html");
        assert_eq!(json["uri"], "https://docs.expo.dev/eas/");
    }
}
