use crate::consts::DEFAULT_SPEAKER;

#[derive(Clone, Debug, PartialEq)]
/// A dialogue line split into who speaks and what is said.
pub(crate) struct SpeakerLine {
    pub speaker: String,
    pub content: String,
}

/// Split a raw line at the first `speaker : content` delimiter.
///
/// Both the ASCII and the fullwidth colon are recognized. A line without a
/// delimiter (or without any text before it) is attributed to the default
/// speaker with the whole trimmed line as content. Returns `None` for lines
/// that are empty after trimming, and for matched lines whose content part
/// is empty: such lines carry no dialogue and are omitted from the graph.
pub(crate) fn split_speaker_line(line: &str) -> Option<SpeakerLine> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return None;
    }

    match trimmed.find(|character| character == ':' || character == '：') {
        Some(position) if position > 0 => {
            let speaker = trimmed[..position].trim();
            let delimiter_len = trimmed[position..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
            let content = trimmed[position + delimiter_len..].trim();

            if content.is_empty() {
                None
            } else {
                Some(SpeakerLine {
                    speaker: speaker.to_string(),
                    content: content.to_string(),
                })
            }
        }
        _ => Some(SpeakerLine {
            speaker: DEFAULT_SPEAKER.to_string(),
            content: trimmed.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_colon_splits_speaker_from_content() {
        let line = split_speaker_line("派蒙: 我们走吧").unwrap();

        assert_eq!(line.speaker, "派蒙");
        assert_eq!(line.content, "我们走吧");
    }

    #[test]
    fn fullwidth_colon_splits_speaker_from_content() {
        let line = split_speaker_line("派蒙：我们走吧").unwrap();

        assert_eq!(line.speaker, "派蒙");
        assert_eq!(line.content, "我们走吧");
    }

    #[test]
    fn split_happens_at_the_first_delimiter_only() {
        let line = split_speaker_line("甲: 时间是 12:30").unwrap();

        assert_eq!(line.speaker, "甲");
        assert_eq!(line.content, "时间是 12:30");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_from_both_parts() {
        let line = split_speaker_line("  甲  :  你好  ").unwrap();

        assert_eq!(line.speaker, "甲");
        assert_eq!(line.content, "你好");
    }

    #[test]
    fn line_without_a_delimiter_gets_the_default_speaker() {
        let line = split_speaker_line("雨停了").unwrap();

        assert_eq!(line.speaker, DEFAULT_SPEAKER);
        assert_eq!(line.content, "雨停了");
    }

    #[test]
    fn line_starting_with_a_delimiter_gets_the_default_speaker() {
        let line = split_speaker_line(": 无名氏的台词").unwrap();

        assert_eq!(line.speaker, DEFAULT_SPEAKER);
        assert_eq!(line.content, ": 无名氏的台词");
    }

    #[test]
    fn empty_lines_yield_nothing() {
        assert_eq!(split_speaker_line(""), None);
        assert_eq!(split_speaker_line("   "), None);
    }

    #[test]
    fn matched_line_with_empty_content_yields_nothing() {
        assert_eq!(split_speaker_line("甲:"), None);
        assert_eq!(split_speaker_line("甲：  "), None);
    }
}
