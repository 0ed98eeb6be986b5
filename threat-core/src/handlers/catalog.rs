//! Handler Catalog
//!
//! Static reference data: one entry per known event type plus the
//! fallback. KHÔNG chứa dispatch logic - registry lo phần đó.

use super::event_type::EventType;
use super::handler::ThreatHandler;
use crate::threat::Severity;

/// Static row of the catalog table
#[derive(Debug)]
pub struct CatalogEntry {
    pub event_type: Option<EventType>,
    pub severity: Severity,
    pub title: &'static str,
    pub description: &'static str,
    pub user_guidance: &'static str,
    pub actions: &'static [&'static str],
}

// ============================================================================
// BUILTIN ENTRIES (registered by default)
// ============================================================================

static BUILTIN: [CatalogEntry; 11] = [
    CatalogEntry {
        event_type: Some(EventType::ROOTED_DEVICE),
        severity: Severity::High,
        title: "Rooted Device Detected",
        description: "A rooted device bypasses normal Android security controls, potentially exposing sensitive data and allowing unauthorized modifications.",
        user_guidance: "For security reasons, this app cannot run on rooted devices. Please use a non-rooted device to access the application.",
        actions: &[
            "Exit the application immediately",
            "Use a non-rooted device",
            "Contact support if this appears to be an error",
            "Log security incident for review",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::UNKNOWN_SOURCES_ENABLED),
        severity: Severity::Medium,
        title: "Unknown Sources Installation Enabled",
        description: "The 'Install from Unknown Sources' setting is enabled, which allows installation of apps from outside the Google Play Store, potentially including malicious applications.",
        user_guidance: "Please disable 'Install from Unknown Sources' in your device settings to improve security.",
        actions: &[
            "Go to Settings > Security",
            "Disable 'Unknown Sources' or 'Install unknown apps'",
            "Only install apps from trusted sources like Google Play Store",
            "Review recently installed apps",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::SSL_CERTIFICATE_VALIDATION_FAILED),
        severity: Severity::High,
        title: "SSL Certificate Validation Failed",
        description: "SSL certificate validation has failed, indicating a potential man-in-the-middle attack or compromised connection.",
        user_guidance: "A secure connection could not be established. Your data may be at risk. Please check your network connection and try again on a trusted network.",
        actions: &[
            "Disconnect from current network",
            "Connect to a trusted network",
            "Avoid entering sensitive information",
            "Contact IT support if on corporate network",
            "Check for proxy or VPN interference",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::SSL_NON_SSL_CONNECTION),
        severity: Severity::High,
        title: "Unencrypted Connection Detected",
        description: "An unencrypted (non-SSL/TLS) connection has been detected. Data transmitted over this connection is vulnerable to interception.",
        user_guidance: "Your data is being transmitted without encryption and could be intercepted. Please ensure you're using a secure connection.",
        actions: &[
            "Ensure HTTPS/SSL is enabled",
            "Check network configuration",
            "Avoid transmitting sensitive data",
            "Use VPN if on public network",
            "Contact support if issue persists",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::SSL_INCOMPATIBLE_VERSION),
        severity: Severity::Medium,
        title: "Incompatible SSL Version",
        description: "An incompatible or outdated SSL/TLS version has been detected, which may be vulnerable to known security exploits.",
        user_guidance: "Your connection is using an outdated encryption method that may not be secure. Please update your device or contact support.",
        actions: &[
            "Update your device's operating system",
            "Check for app updates",
            "Use a different network if possible",
            "Contact support for assistance",
            "Avoid sensitive transactions until resolved",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::NETWORK_PROXY_CONFIGURED),
        severity: Severity::Medium,
        title: "Network Proxy Detected",
        description: "A network proxy has been configured on this device, which could potentially intercept or monitor network traffic.",
        user_guidance: "A network proxy is configured on your device. If you didn't set this up intentionally, it could be a security risk.",
        actions: &[
            "Review proxy settings in device configuration",
            "Disable proxy if not intentionally configured",
            "Check for unauthorized network configuration changes",
            "Use direct connection when possible",
            "Contact IT support if on corporate network",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::DEBUGGER_THREAT_DETECTED),
        severity: Severity::High,
        title: "Debugger Attached",
        description: "A debugger has been attached to the application, which could be used for reverse engineering or code manipulation.",
        user_guidance: "A debugging tool has been detected. For security reasons, the application cannot run while debugging tools are active.",
        actions: &[
            "Close any debugging or development tools",
            "Restart the application",
            "Use the production version of the app",
            "Contact support if this appears incorrectly",
            "Scan device for potentially unwanted programs",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::APP_IS_DEBUGGABLE),
        severity: Severity::Medium,
        title: "App in Debuggable State",
        description: "The application is running in a debuggable state, which exposes additional attack vectors and debugging capabilities.",
        user_guidance: "This app version has debugging enabled, which may pose security risks. Please use the production version of the app.",
        actions: &[
            "Download the production version from official app store",
            "Avoid entering sensitive information",
            "Contact support for the correct app version",
            "Remove any development/beta versions",
            "Check app installation source",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::APP_INTEGRITY_ERROR),
        severity: Severity::Critical,
        title: "App Integrity Compromised",
        description: "The application binary has been modified or tampered with, indicating a potential security breach or malware infection.",
        user_guidance: "CRITICAL SECURITY WARNING: This app has been tampered with and cannot be trusted. Do not proceed with using this application.",
        actions: &[
            "IMMEDIATELY exit the application",
            "Uninstall the compromised app",
            "Download from official app store only",
            "Scan device for malware",
            "Change any passwords used with this app",
            "Report incident to security team",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::EMULATOR_FOUND),
        severity: Severity::Low,
        title: "Emulator Environment Detected",
        description: "The application is running in an emulated environment rather than on a physical device.",
        user_guidance: "This app is designed to run on physical devices only. Please install and run on an actual mobile device.",
        actions: &[
            "Use a physical Android device",
            "Install the app from Google Play Store",
            "Contact support if you believe this is an error",
            "Check if device passes Google SafetyNet",
            "Avoid sensitive operations on emulated devices",
        ],
    },
    CatalogEntry {
        event_type: Some(EventType::GOOGLE_EMULATOR_DETECTED),
        severity: Severity::Low,
        title: "Google Emulator Detected",
        description: "The application is running on Google's Android emulator, which is typically used for development and testing purposes.",
        user_guidance: "This app is running on Google's emulator. For the best experience and security, please use a physical device.",
        actions: &[
            "Switch to a physical Android device",
            "Download the production app from Google Play Store",
            "Contact support if needed for development access",
            "Use device for testing purposes only",
            "Avoid production data on emulated devices",
        ],
    },
];

// ============================================================================
// OPTIONAL + FALLBACK ENTRIES
// ============================================================================

static DEVELOPER_OPTIONS: CatalogEntry = CatalogEntry {
    event_type: Some(EventType::DEVELOPER_OPTIONS_ENABLED),
    severity: Severity::Medium,
    title: "Developer Options Enabled",
    description: "Android Developer Options are enabled on this device, which exposes debugging capabilities and development features that could be exploited by malicious applications or attackers.",
    user_guidance: "Please disable Developer Options in your device settings to improve security unless you are actively developing applications.",
    actions: &[
        "Go to Settings > About Phone",
        "Stop tapping 'Build Number' to keep Developer Options hidden",
        "If Developer Options are visible, go to Settings > Developer Options",
        "Toggle 'Developer Options' to OFF",
        "Disable 'USB Debugging' if it's enabled",
        "Restart your device to ensure changes take effect",
    ],
};

static FALLBACK: CatalogEntry = CatalogEntry {
    event_type: None,
    severity: Severity::Medium,
    title: "Security Threat Detected",
    description: "A security threat has been detected on your device. The specific threat type may not be recognized by this version of the app.",
    user_guidance: "A security issue has been identified. Please follow the recommended actions and consider updating the app if available.",
    actions: &[
        "Update the app to the latest version",
        "Review device security settings",
        "Contact support for assistance",
        "Avoid sensitive operations until resolved",
        "Consider restarting the device",
    ],
};

/// Entries the registry installs on construction
pub fn builtin_entries() -> &'static [CatalogEntry] {
    &BUILTIN
}

pub fn builtin_handlers() -> Vec<ThreatHandler> {
    BUILTIN.iter().map(ThreatHandler::from_entry).collect()
}

pub fn fallback() -> ThreatHandler {
    ThreatHandler::from_entry(&FALLBACK)
}

/// Catalogued, not registered by default
pub fn developer_options_enabled() -> ThreatHandler {
    ThreatHandler::from_entry(&DEVELOPER_OPTIONS)
}
