//! Input device resolution.
//!
//! Device identifiers from configuration are matched as name fragments
//! against the devices cpal reports. Identifiers that embed a USB
//! `VID_xxxx&PID_yyyy` pair (full platform device paths) are reduced to that
//! pair first, so a long registry-style string from a config file still
//! matches the shorter name the host exposes.

use cpal::traits::{DeviceTrait, HostTrait};
use regex::Regex;

use array_capture_core::models::device::InputDevice;
use array_capture_core::models::error::CaptureError;

/// Extract the `VID_xxxx&PID_yyyy` pair from a platform device string.
pub fn extract_usb_id(device_id: &str) -> Option<&str> {
    let pattern = Regex::new(r"VID_[0-9A-Fa-f]+&PID_[0-9A-Fa-f]+").expect("valid pattern");
    pattern.find(device_id).map(|m| m.as_str())
}

/// Reduce a device identifier to its matchable form.
pub fn normalize_device_id(device_id: &str) -> &str {
    extract_usb_id(device_id).unwrap_or(device_id)
}

/// Resolve an input device by identifier, or the system default for `None`.
pub fn resolve_input_device(
    host: &cpal::Host,
    device_id: Option<&str>,
) -> Result<cpal::Device, CaptureError> {
    match device_id {
        None => host
            .default_input_device()
            .ok_or_else(|| CaptureError::DeviceNotAvailable("no default input device".into())),
        Some(raw) => {
            let wanted = normalize_device_id(raw);
            host.input_devices()
                .map_err(|e| CaptureError::DeviceNotAvailable(e.to_string()))?
                .find(|d| d.name().map(|n| n.contains(wanted)).unwrap_or(false))
                .ok_or_else(|| {
                    CaptureError::DeviceNotAvailable(format!(
                        "no input device matching {wanted:?}"
                    ))
                })
        }
    }
}

/// List the input devices this host exposes.
pub fn list_input_devices(host: &cpal::Host) -> Result<Vec<InputDevice>, CaptureError> {
    let default_name = host
        .default_input_device()
        .and_then(|d| d.name().ok());

    let mut devices = Vec::new();
    for device in host
        .input_devices()
        .map_err(|e| CaptureError::DeviceNotAvailable(e.to_string()))?
    {
        let name = match device.name() {
            Ok(name) => name,
            Err(e) => {
                log::debug!("skipping unnamed input device: {}", e);
                continue;
            }
        };

        let max_channels = device
            .supported_input_configs()
            .map(|configs| configs.map(|c| c.channels()).max().unwrap_or(0))
            .unwrap_or(0);

        devices.push(InputDevice {
            id: name.clone(),
            is_default: default_name.as_deref() == Some(name.as_str()),
            name,
            max_channels,
        });
    }
    Ok(devices)
}
