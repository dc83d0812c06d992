//! Turning resolved styles into the values shown in the panel.
//!
//! Values equal to the CSS default sentinel `normal` are shown as an empty
//! string to keep the panel quiet, and `font-feature-settings` is reduced to
//! the features that are actually switched on.

use crate::StyleSnapshot;

/// The CSS keyword treated as "nothing to show".
pub const DEFAULT_SENTINEL: &str = "normal";

/// One of the value slots in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReadoutField {
    /// Tag name of the inspected element
    Tag,
    /// `font-family`
    FontFamily,
    /// `font-size`
    FontSize,
    /// `font-weight`
    FontWeight,
    /// `line-height`
    LineHeight,
    /// `letter-spacing`
    LetterSpacing,
    /// `font-feature-settings`
    FontFeatures,
}

impl ReadoutField {
    /// All fields, in panel order
    pub const ALL: [ReadoutField; 7] = [
        ReadoutField::Tag,
        ReadoutField::FontFamily,
        ReadoutField::FontSize,
        ReadoutField::FontWeight,
        ReadoutField::LineHeight,
        ReadoutField::LetterSpacing,
        ReadoutField::FontFeatures,
    ];

    /// Id of the value element for this field in the panel markup
    pub const fn element_id(&self) -> &'static str {
        match self {
            ReadoutField::Tag => "i_tag",
            ReadoutField::FontFamily => "i_fontFamily",
            ReadoutField::FontSize => "i_fontSize",
            ReadoutField::FontWeight => "i_fontWeight",
            ReadoutField::LineHeight => "i_lineHeight",
            ReadoutField::LetterSpacing => "i_letterSpacing",
            ReadoutField::FontFeatures => "i_fontFeatures",
        }
    }
}

/// The normalized values for every [`ReadoutField`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readout {
    /// Lowercased tag name
    pub tag: String,
    /// Font family list, verbatim
    pub font_family: String,
    /// Font size
    pub font_size: String,
    /// Font weight
    pub font_weight: String,
    /// Line height
    pub line_height: String,
    /// Letter spacing
    pub letter_spacing: String,
    /// Enabled OpenType features
    pub font_features: String,
}

impl Readout {
    /// A readout with every field empty, used when the target is gone.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Normalize a resolved style snapshot for display.
    pub fn from_snapshot(snapshot: &StyleSnapshot) -> Self {
        Self {
            tag: snapshot.tag_name.trim().to_ascii_lowercase(),
            font_family: display_value(&snapshot.font_family),
            font_size: display_value(&snapshot.font_size),
            font_weight: display_value(&snapshot.font_weight),
            line_height: display_value(&snapshot.line_height),
            letter_spacing: display_value(&snapshot.letter_spacing),
            font_features: feature_settings(&snapshot.font_feature_settings),
        }
    }

    /// The value destined for `field`
    pub fn value(&self, field: ReadoutField) -> &str {
        match field {
            ReadoutField::Tag => &self.tag,
            ReadoutField::FontFamily => &self.font_family,
            ReadoutField::FontSize => &self.font_size,
            ReadoutField::FontWeight => &self.font_weight,
            ReadoutField::LineHeight => &self.line_height,
            ReadoutField::LetterSpacing => &self.letter_spacing,
            ReadoutField::FontFeatures => &self.font_features,
        }
    }
}

/// A resolved value as shown in the panel: trimmed, and empty when it is the
/// `normal` sentinel.
pub fn display_value(value: &str) -> String {
    let value = value.trim();
    if value.eq_ignore_ascii_case(DEFAULT_SENTINEL) {
        String::new()
    } else {
        value.to_string()
    }
}

/// Reduce a `font-feature-settings` value to the enabled features.
///
/// Tags lose their surrounding quotes, features whose flag is `0` or `off` are
/// dropped, a flag of `1` or `on` is implied and any other flag is kept after
/// the tag.
pub fn feature_settings(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(DEFAULT_SENTINEL) {
        return String::new();
    }

    value
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split_whitespace();
            let tag = strip_quotes(parts.next()?);
            if tag.is_empty() {
                return None;
            }
            match parts.next() {
                None | Some("1") => Some(tag.to_string()),
                Some(flag) if flag.eq_ignore_ascii_case("on") => Some(tag.to_string()),
                Some(flag) if flag.eq_ignore_ascii_case("off") => None,
                Some(flag) if flag.parse::<i64>() == Ok(0) => None,
                Some(flag) => Some(format!("{tag} {flag}")),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn strip_quotes(tag: &str) -> &str {
    tag.trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_blanks_the_normal_sentinel() {
        assert_eq!(display_value("normal"), "");
        assert_eq!(display_value(" NORMAL "), "");
        assert_eq!(display_value("2px"), "2px");
        assert_eq!(display_value("-0.01em"), "-0.01em");
    }

    #[test]
    fn it_keeps_only_enabled_features() {
        assert_eq!(feature_settings("normal"), "");
        assert_eq!(feature_settings(""), "");
        assert_eq!(feature_settings(r#""liga" 0"#), "");
        assert_eq!(
            feature_settings(r#""liga" 0, "ss01", "kern" 1, "swsh" 2"#),
            "ss01, kern, swsh 2"
        );
        assert_eq!(feature_settings("'smcp' on, 'onum' off"), "smcp");
    }

    #[test]
    fn it_normalizes_a_full_snapshot() {
        let snapshot = StyleSnapshot {
            tag_name: "H1".into(),
            font_family: r#""Inter", sans-serif"#.into(),
            font_size: "32px".into(),
            font_weight: "700".into(),
            line_height: "normal".into(),
            letter_spacing: "normal".into(),
            font_feature_settings: r#""tnum""#.into(),
        };

        let readout = Readout::from_snapshot(&snapshot);

        assert_eq!(
            readout,
            Readout {
                tag: "h1".into(),
                font_family: r#""Inter", sans-serif"#.into(),
                font_size: "32px".into(),
                font_weight: "700".into(),
                line_height: "".into(),
                letter_spacing: "".into(),
                font_features: "tnum".into(),
            }
        );
        assert_eq!(readout.value(ReadoutField::FontSize), "32px");
    }

    #[test]
    fn it_gives_every_field_a_distinct_element() {
        let mut ids = ReadoutField::ALL.map(|field| field.element_id()).to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ReadoutField::ALL.len());
    }
}
