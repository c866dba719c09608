//! Notice appended to emoji and sticker popouts for fake widgets.

/// Which kind of widget a popout describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeNoticeKind {
    Sticker,
    Emoji,
}

impl FakeNoticeKind {
    const fn notice(self) -> &'static str {
        match self {
            Self::Sticker => {
                " This is a FakeNitro sticker and renders like a real sticker only for you. Appears as a link to non-plugin users."
            }
            Self::Emoji => {
                " This is a FakeNitro emoji and renders like a real emoji only for you. Appears as a link to non-plugin users."
            }
        }
    }
}

pub struct FakeNoticeService;

impl FakeNoticeService {
    /// Appends the fake notice to `description` when the widget is fake.
    #[must_use]
    pub fn decorate(kind: FakeNoticeKind, description: &str, fake: bool) -> String {
        if fake {
            format!("{description}{}", kind.notice())
        } else {
            description.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_sticker_gets_notice() {
        let text = FakeNoticeService::decorate(FakeNoticeKind::Sticker, "A sticker.", true);
        assert!(text.starts_with("A sticker. This is a FakeNitro sticker"));
        assert!(text.ends_with("non-plugin users."));
    }

    #[test]
    fn test_real_emoji_is_unchanged() {
        let text = FakeNoticeService::decorate(FakeNoticeKind::Emoji, "An emoji.", false);
        assert_eq!(text, "An emoji.");
    }

    #[test]
    fn test_emoji_notice_names_emoji() {
        let text = FakeNoticeService::decorate(FakeNoticeKind::Emoji, "", true);
        assert!(text.contains("real emoji only for you"));
    }
}
