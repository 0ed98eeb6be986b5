//! Field Extractor
//!
//! Pure projections of a payload into its six sub-records. The field
//! subsets are fixed and disjoint; together they cover `PAYLOAD_FIELDS`.

use super::types::{
    BuildInfo, DeviceInfo, SecurityInfo, ThreatDetails, ThreatEventPayload, ThreatIdentifiers,
    ThreatMessages,
};

pub fn extract_device_info(payload: &ThreatEventPayload) -> DeviceInfo {
    DeviceInfo {
        device_id: payload.device_id.clone(),
        device_model: payload.device_model.clone(),
        device_manufacturer: payload.device_manufacturer.clone(),
        device_brand: payload.device_brand.clone(),
        device_board: payload.device_board.clone(),
        os_version: payload.os_version.clone(),
        arch: payload.arch.clone(),
        baseband_version: payload.baseband_version.clone(),
        carrier_plmn: payload.carrier_plmn.clone(),
    }
}

pub fn extract_build_info(payload: &ThreatEventPayload) -> BuildInfo {
    BuildInfo {
        build_number: payload.build_number.clone(),
        build_host: payload.build_host.clone(),
        build_user: payload.build_user.clone(),
        kernel_info: payload.kernel_info.clone(),
        sdk_version: payload.sdk_version.clone(),
        is_aab: payload.is_aab.clone(),
    }
}

pub fn extract_security_info(payload: &ThreatEventPayload) -> SecurityInfo {
    SecurityInfo {
        sandbox_path: payload.sandbox_path.clone(),
        is_sandbox_path_writable: payload.is_sandbox_path_writable.clone(),
        is_proc_readable: payload.is_proc_readable.clone(),
        uid: payload.uid.clone(),
    }
}

pub fn extract_threat_details(payload: &ThreatEventPayload) -> ThreatDetails {
    ThreatDetails {
        reason_code: payload.reason_code.clone(),
        threat_code: payload.threat_code.clone(),
        external_id: payload.external_id.clone(),
        reason_data: payload.reason_data.clone(),
    }
}

pub fn extract_messages(payload: &ThreatEventPayload) -> ThreatMessages {
    ThreatMessages {
        message: payload.message.clone(),
        default_message: payload.default_message.clone(),
    }
}

pub fn extract_identifiers(payload: &ThreatEventPayload) -> ThreatIdentifiers {
    ThreatIdentifiers {
        uuid: payload.uuid.clone(),
        fused_app_token: payload.fused_app_token.clone(),
        timestamp: payload.timestamp.clone(),
    }
}
