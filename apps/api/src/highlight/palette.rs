use serde::Serialize;

use crate::analysis::models::Severity;

/// Background/border color pair a renderer applies to one severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorToken {
    pub background: &'static str,
    pub border: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct SeverityStyle {
    pub severity: Severity,
    pub color: ColorToken,
    pub label: &'static str,
    pub emoji: &'static str,
}

/// Indexed by `Severity as usize` (Low, Medium, High).
pub const PALETTE: [SeverityStyle; 3] = [
    SeverityStyle {
        severity: Severity::Low,
        color: ColorToken {
            background: "#ECFDF5",
            border: "#10B981",
        },
        label: "참고",
        emoji: "💡",
    },
    SeverityStyle {
        severity: Severity::Medium,
        color: ColorToken {
            background: "#FFFBEB",
            border: "#F59E0B",
        },
        label: "주의",
        emoji: "⚠️",
    },
    SeverityStyle {
        severity: Severity::High,
        color: ColorToken {
            background: "#FEF2F2",
            border: "#DC2626",
        },
        label: "위험",
        emoji: "🚨",
    },
];

pub fn style_for(severity: Severity) -> &'static SeverityStyle {
    &PALETTE[severity as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_indexed_by_severity() {
        for (i, style) in PALETTE.iter().enumerate() {
            assert_eq!(style.severity as usize, i);
        }
    }

    #[test]
    fn test_high_is_red() {
        let style = style_for(Severity::High);
        assert_eq!(style.color.border, "#DC2626");
        assert_eq!(style.label, "위험");
    }

    #[test]
    fn test_low_label() {
        assert_eq!(style_for(Severity::Low).label, "참고");
        assert_eq!(style_for(Severity::Medium).color.background, "#FFFBEB");
    }
}
