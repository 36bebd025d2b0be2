//! Plain-text rendering of a configuration for the terminal

use mixdesk_common::db::models::ConfigurationDetail;
use std::fmt::Write;

/// Format one configuration the way the console shows it: interface and
/// frequency first, then the input bindings, then the channel strip states.
pub fn format_configuration(detail: &ConfigurationDetail) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Configuration {} (saved {})",
        detail.id,
        detail.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "  User: {}", detail.user.email);
    let _ = writeln!(
        out,
        "  Interface: {} ({})",
        detail.interface.commercial_name, detail.interface.model
    );
    match &detail.frequency {
        Some(frequency) => {
            let _ = writeln!(out, "  Frequency: {} kHz", frequency.value);
        }
        None => {
            let _ = writeln!(out, "  Frequency: not set");
        }
    }

    let _ = writeln!(out, "  Inputs:");
    if detail.inputs.is_empty() {
        let _ = writeln!(out, "    (none)");
    }
    for binding in &detail.inputs {
        let _ = writeln!(
            out,
            "    {} -> {}",
            binding.input_label, binding.device_name
        );
    }

    let _ = writeln!(out, "  Channels:");
    if detail.channels.is_empty() {
        let _ = writeln!(out, "    (none)");
    }
    for channel in &detail.channels {
        let mut flags = Vec::new();
        if channel.mute {
            flags.push("mute");
        }
        if channel.solo {
            flags.push("solo");
        }
        if channel.link {
            flags.push("link");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        let source_type = channel.source_type.as_deref().unwrap_or("unassigned");
        let _ = writeln!(
            out,
            "    {} ({}): volume {}{}",
            channel.label, source_type, channel.volume, flags
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mixdesk_common::db::models::{
        AudioInterface, ChannelState, Frequency, InputBinding, User,
    };

    fn sample_detail() -> ConfigurationDetail {
        ConfigurationDetail {
            id: 7,
            created_at: NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            user: User {
                id: 1,
                email: "operator@studio.example".to_string(),
                password_hash: "hash".to_string(),
            },
            interface: AudioInterface {
                id: 2,
                short_name: "2i2".to_string(),
                model: "Scarlett 2i2".to_string(),
                commercial_name: "Focusrite Scarlett 2i2".to_string(),
                price: Some(189.0),
                frequency_id: Some(3),
            },
            frequency: Some(Frequency { id: 3, value: 48.0 }),
            channels: vec![ChannelState {
                id: 1,
                label: "CH 1".to_string(),
                source_type: Some("Vocals".to_string()),
                volume: 62.0,
                solo: false,
                mute: true,
                link: false,
            }],
            inputs: vec![InputBinding {
                input_id: 1,
                input_label: "Input 1".to_string(),
                device_id: 4,
                device_name: "SM58".to_string(),
                device_description: None,
            }],
        }
    }

    #[test]
    fn renders_all_sections() {
        let text = format_configuration(&sample_detail());

        assert!(text.contains("Configuration 7 (saved 2026-03-14 10:30:00)"));
        assert!(text.contains("User: operator@studio.example"));
        assert!(text.contains("Interface: Focusrite Scarlett 2i2 (Scarlett 2i2)"));
        assert!(text.contains("Frequency: 48 kHz"));
        assert!(text.contains("Input 1 -> SM58"));
        assert!(text.contains("CH 1 (Vocals): volume 62 [mute]"));
        assert!(!text.contains("hash"));
    }

    #[test]
    fn empty_associations_render_placeholders() {
        let mut detail = sample_detail();
        detail.channels.clear();
        detail.inputs.clear();
        detail.frequency = None;

        let text = format_configuration(&detail);
        assert!(text.contains("Frequency: not set"));
        assert_eq!(text.matches("(none)").count(), 2);
    }
}
