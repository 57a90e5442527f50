use std::path::PathBuf;
use std::time::{Duration, Instant};

use iced::widget::image;
use iced::{time, Element, Size, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

// Domain modules
mod encode;
mod export;
mod theme;
mod ui;

use encode::{EncodeError, QrRequest};
use export::download::DownloadError;
use export::share::{ShareError, ShareOutcome};
use theme::ThemeMode;
use ui::toast::Notice;

/// Smallest selectable edge length, in pixels
pub const MIN_RENDER_SIZE: u32 = 128;
/// Largest selectable edge length, in pixels
pub const MAX_RENDER_SIZE: u32 = 512;
/// Slider increment between selectable sizes
pub const SIZE_STEP: u32 = 32;

/// Edge length new sessions start with
const DEFAULT_RENDER_SIZE: u32 = 256;

/// How long a notice stays on screen before auto-dismissing
const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// How often a visible notice is checked against its deadline
const NOTICE_POLL: Duration = Duration::from_millis(250);

/// A successfully generated QR image
#[derive(Debug, Clone)]
pub struct QrImage {
    /// The encoder's returned value, a PNG data URI
    pub data_uri: String,
    /// Decoded pixels ready for the image widget
    pub handle: image::Handle,
}

/// Main application state
pub struct QrStudio {
    /// Text the user wants encoded
    pub input_text: String,
    /// Requested pixel edge for generated images
    pub render_size: u32,
    /// Active display mode
    pub theme_mode: ThemeMode,
    /// The last successfully generated image, if any.
    /// Nothing invalidates this on input, size, or theme edits; only a
    /// fresh generation or an explicit clear touches it.
    pub qr_image: Option<QrImage>,
    /// Whether an encode call is in flight
    pub generating: bool,
    /// The currently displayed notice, if any
    pub notice: Option<Notice>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User edited the text field
    InputChanged(String),
    /// User moved the size slider
    SizeChanged(u32),
    /// User asked for a QR code (button or Enter)
    GeneratePressed,
    /// Background encode settled
    GenerationFinished(Result<String, EncodeError>),
    /// User clicked the "Copy" button
    CopyPressed,
    /// User clicked the "Clear" button
    ClearPressed,
    /// User flipped the theme
    ThemeToggled,
    /// User clicked the "Download" button
    DownloadPressed,
    /// Background save settled
    DownloadFinished(Result<PathBuf, DownloadError>),
    /// User clicked the "Share" button
    SharePressed,
    /// Background share hand-off settled
    ShareFinished(Result<ShareOutcome, ShareError>),
    /// Timer tick while a notice is visible
    NoticeTick(Instant),
}

impl Default for QrStudio {
    fn default() -> Self {
        QrStudio {
            input_text: String::new(),
            render_size: DEFAULT_RENDER_SIZE,
            theme_mode: ThemeMode::Light,
            qr_image: None,
            generating: false,
            notice: None,
        }
    }
}

impl QrStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let theme_mode = ThemeMode::detect();
        tracing::info!("QR Studio starting in {} mode", theme_mode.label());

        (
            QrStudio {
                theme_mode,
                ..QrStudio::default()
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.input_text = value;
                Task::none()
            }
            Message::SizeChanged(size) => {
                self.render_size = size;
                Task::none()
            }
            Message::GeneratePressed => self.begin_generation(),
            Message::GenerationFinished(result) => {
                self.generating = false;

                match result {
                    Ok(data_uri) => match encode::decode_data_uri(&data_uri) {
                        Ok(png) => {
                            self.qr_image = Some(QrImage {
                                data_uri,
                                handle: image::Handle::from_bytes(png),
                            });
                            self.notice = Some(Notice::success("QR code generated successfully!"));
                        }
                        Err(err) => {
                            tracing::error!("generated value could not be read back: {}", err);
                            self.notice = Some(Notice::error("Failed to generate QR code"));
                        }
                    },
                    Err(err) => {
                        // The previous image, if any, stays displayed
                        tracing::error!("QR encoding failed: {}", err);
                        self.notice = Some(Notice::error("Failed to generate QR code"));
                    }
                }

                Task::none()
            }
            Message::CopyPressed => {
                let Some(text) = self.clipboard_payload() else {
                    return Task::none();
                };

                // The clipboard task reports no outcome, so the notice is optimistic
                self.notice = Some(Notice::success("Copied to clipboard!"));
                iced::clipboard::write(text)
            }
            Message::ClearPressed => {
                self.input_text.clear();
                self.qr_image = None;
                self.notice = Some(Notice::success("Cleared"));
                Task::none()
            }
            Message::ThemeToggled => {
                self.theme_mode = self.theme_mode.toggled();
                self.notice = Some(Notice::success(format!(
                    "{} mode enabled",
                    self.theme_mode.label()
                )));
                Task::none()
            }
            Message::DownloadPressed => {
                let Some(qr) = &self.qr_image else {
                    return Task::none();
                };

                match encode::decode_data_uri(&qr.data_uri) {
                    Ok(png) => Task::perform(
                        export::download::save_png(png, self.input_text.clone()),
                        Message::DownloadFinished,
                    ),
                    Err(err) => {
                        tracing::error!("displayed image could not be read back: {}", err);
                        self.notice = Some(Notice::error("Failed to save QR code"));
                        Task::none()
                    }
                }
            }
            Message::DownloadFinished(Ok(path)) => {
                tracing::info!("QR code saved to {}", path.display());
                self.notice = Some(Notice::success("QR code downloaded!"));
                Task::none()
            }
            Message::DownloadFinished(Err(err)) => {
                tracing::error!("saving the QR code failed: {}", err);
                self.notice = Some(Notice::error("Failed to save QR code"));
                Task::none()
            }
            Message::SharePressed => {
                let Some(qr) = &self.qr_image else {
                    return Task::none();
                };

                match encode::decode_data_uri(&qr.data_uri) {
                    Ok(png) => {
                        Task::perform(export::share::share_png(png), Message::ShareFinished)
                    }
                    Err(err) => {
                        tracing::error!("displayed image could not be read back: {}", err);
                        self.notice = Some(Notice::error("Sharing failed or is not supported"));
                        Task::none()
                    }
                }
            }
            Message::ShareFinished(Ok(ShareOutcome::Shared)) => {
                self.notice = Some(Notice::success("QR code shared successfully!"));
                Task::none()
            }
            Message::ShareFinished(Ok(ShareOutcome::Cancelled)) => {
                // The user backed out: stay quiet
                tracing::debug!("share hand-off dismissed");
                Task::none()
            }
            Message::ShareFinished(Ok(ShareOutcome::Unsupported)) => {
                self.notice = Some(Notice::info("URL copied to clipboard for sharing"));
                match self.clipboard_payload() {
                    Some(text) => iced::clipboard::write(text),
                    None => Task::none(),
                }
            }
            Message::ShareFinished(Err(err)) => {
                tracing::error!("share failed: {}", err);
                self.notice = Some(Notice::error("Sharing failed or is not supported"));
                Task::none()
            }
            Message::NoticeTick(now) => {
                if self
                    .notice
                    .as_ref()
                    .is_some_and(|notice| notice.is_expired(now, NOTICE_DURATION))
                {
                    self.notice = None;
                }
                Task::none()
            }
        }
    }

    /// Validate the input and kick off a background encode
    fn begin_generation(&mut self) -> Task<Message> {
        // A second press while busy is a no-op
        if self.generating {
            return Task::none();
        }

        if self.input_text.trim().is_empty() {
            self.notice = Some(Notice::error("Please enter text or URL"));
            return Task::none();
        }

        self.generating = true;
        let request = QrRequest {
            payload: self.input_text.clone(),
            size: self.render_size,
            colors: self.theme_mode.qr_colors(),
        };

        Task::perform(encode::generate(request), Message::GenerationFinished)
    }

    /// Input text as a clipboard payload, or `None` when the field is
    /// empty. An emptied field never reaches the clipboard, even while
    /// a stale image keeps the share fallback reachable.
    fn clipboard_payload(&self) -> Option<String> {
        if self.input_text.is_empty() {
            None
        } else {
            Some(self.input_text.clone())
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        ui::page::view(self)
    }

    /// Tick while a notice is visible so it can expire on its deadline
    fn subscription(&self) -> Subscription<Message> {
        if self.notice.is_some() {
            time::every(NOTICE_POLL).map(Message::NoticeTick)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application("QR Studio", QrStudio::update, QrStudio::view)
        .subscription(QrStudio::subscription)
        .theme(QrStudio::theme)
        .window_size(Size::new(880.0, 820.0))
        .centered()
        .run_with(QrStudio::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ui::toast::NoticeKind;

    /// Encode the app's active triple the way the background task would
    fn encode_active(app: &QrStudio) -> String {
        encode::encode_to_data_uri(&QrRequest {
            payload: app.input_text.clone(),
            size: app.render_size,
            colors: app.theme_mode.qr_colors(),
        })
        .unwrap()
    }

    /// Drive a full successful generation through the update loop
    fn generated_app(payload: &str) -> QrStudio {
        let mut app = QrStudio::default();
        let _ = app.update(Message::InputChanged(payload.to_string()));

        let _ = app.update(Message::GeneratePressed);
        assert!(app.generating);

        let uri = encode_active(&app);
        let _ = app.update(Message::GenerationFinished(Ok(uri)));
        app
    }

    #[test]
    fn test_whitespace_input_blocks_generation() {
        let mut app = QrStudio::default();
        let _ = app.update(Message::InputChanged(" \t  ".to_string()));

        let _ = app.update(Message::GeneratePressed);

        assert!(!app.generating);
        assert!(app.qr_image.is_none());
        let notice = app.notice.expect("validation should leave a notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Please enter text or URL");
    }

    #[test]
    fn test_generation_settles_with_the_delivered_image() {
        let app = generated_app("https://example.com");

        assert!(!app.generating);
        let qr = app.qr_image.expect("image should be stored");
        assert_eq!(qr.data_uri, encode_active_for("https://example.com"));

        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text, "QR code generated successfully!");
    }

    /// Same triple the generated_app helper runs with
    fn encode_active_for(payload: &str) -> String {
        let mut reference = QrStudio::default();
        reference.input_text = payload.to_string();
        encode_active(&reference)
    }

    #[test]
    fn test_generation_is_idempotent_for_unchanged_inputs() {
        let first = generated_app("same payload");
        let second = generated_app("same payload");

        assert_eq!(
            first.qr_image.unwrap().data_uri,
            second.qr_image.unwrap().data_uri
        );
    }

    #[test]
    fn test_second_press_while_busy_changes_nothing() {
        let mut app = QrStudio::default();
        let _ = app.update(Message::InputChanged("busy".to_string()));
        let _ = app.update(Message::GeneratePressed);
        assert!(app.generating);

        let _ = app.update(Message::GeneratePressed);

        assert!(app.generating);
        assert!(app.qr_image.is_none());
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_trigger_reenables_after_settlement() {
        let mut app = generated_app("first");
        assert!(!app.generating);

        let _ = app.update(Message::GeneratePressed);
        assert!(app.generating);
    }

    #[test]
    fn test_encode_failure_keeps_the_previous_image() {
        let mut app = generated_app("first");
        let kept = app.qr_image.as_ref().unwrap().data_uri.clone();

        let _ = app.update(Message::GeneratePressed);
        let _ = app.update(Message::GenerationFinished(Err(EncodeError::Task(
            "boom".to_string(),
        ))));

        assert!(!app.generating);
        assert_eq!(app.qr_image.unwrap().data_uri, kept);
        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Failed to generate QR code");
    }

    #[test]
    fn test_stale_image_survives_input_and_size_edits() {
        let mut app = generated_app("original");
        let kept = app.qr_image.as_ref().unwrap().data_uri.clone();

        let _ = app.update(Message::InputChanged("something else".to_string()));
        let _ = app.update(Message::SizeChanged(512));

        assert_eq!(app.qr_image.unwrap().data_uri, kept);
    }

    #[test]
    fn test_theme_toggle_touches_nothing_but_the_mode() {
        let mut app = generated_app("payload");
        let kept = app.qr_image.as_ref().unwrap().data_uri.clone();

        let _ = app.update(Message::ThemeToggled);

        assert_eq!(app.theme_mode, ThemeMode::Dark);
        assert_eq!(app.input_text, "payload");
        assert_eq!(app.render_size, 256);
        assert_eq!(app.qr_image.unwrap().data_uri, kept);

        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text, "Dark mode enabled");
    }

    #[test]
    fn test_clear_resets_input_and_image_only() {
        let mut app = generated_app("to be cleared");
        let _ = app.update(Message::SizeChanged(320));
        let _ = app.update(Message::ThemeToggled);

        let _ = app.update(Message::ClearPressed);

        assert_eq!(app.input_text, "");
        assert!(app.qr_image.is_none());
        assert_eq!(app.render_size, 320);
        assert_eq!(app.theme_mode, ThemeMode::Dark);
        assert_eq!(app.notice.unwrap().text, "Cleared");
    }

    #[test]
    fn test_copy_with_empty_input_is_silent() {
        let mut app = QrStudio::default();

        let _ = app.update(Message::CopyPressed);

        assert!(app.notice.is_none());
    }

    #[test]
    fn test_copy_reports_success() {
        let mut app = QrStudio::default();
        let _ = app.update(Message::InputChanged("copy me".to_string()));

        let _ = app.update(Message::CopyPressed);

        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text, "Copied to clipboard!");
    }

    #[test]
    fn test_download_and_share_need_an_image() {
        let mut app = QrStudio::default();
        let _ = app.update(Message::InputChanged("no image yet".to_string()));

        let _ = app.update(Message::DownloadPressed);
        let _ = app.update(Message::SharePressed);

        assert!(app.notice.is_none());
    }

    #[test]
    fn test_download_completion_reports_the_save() {
        let mut app = QrStudio::default();

        let _ = app.update(Message::DownloadFinished(Ok(PathBuf::from(
            "/tmp/qrcode-x.png",
        ))));
        assert_eq!(app.notice.take().unwrap().text, "QR code downloaded!");

        let _ = app.update(Message::DownloadFinished(Err(DownloadError::NoDownloadsDir)));
        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Failed to save QR code");
    }

    #[test]
    fn test_share_cancellation_stays_silent() {
        let mut app = generated_app("shared");
        app.notice = None;

        let _ = app.update(Message::ShareFinished(Ok(ShareOutcome::Cancelled)));

        assert!(app.notice.is_none());
    }

    #[test]
    fn test_share_failure_raises_one_error_notice() {
        let mut app = generated_app("shared");

        let _ = app.update(Message::ShareFinished(Err(ShareError::HandOff(
            "launcher exited with status 2".to_string(),
        ))));

        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Sharing failed or is not supported");
    }

    #[test]
    fn test_share_fallback_copies_the_text_instead() {
        let mut app = generated_app("fallback");

        let _ = app.update(Message::ShareFinished(Ok(ShareOutcome::Unsupported)));

        assert_eq!(app.clipboard_payload().as_deref(), Some("fallback"));
        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.text, "URL copied to clipboard for sharing");
    }

    #[test]
    fn test_share_fallback_with_emptied_input_writes_nothing() {
        let mut app = generated_app("https://example.com");
        let _ = app.update(Message::InputChanged(String::new()));
        assert!(app.qr_image.is_some());

        let _ = app.update(Message::SharePressed);
        let _ = app.update(Message::ShareFinished(Ok(ShareOutcome::Unsupported)));

        assert!(app.clipboard_payload().is_none());
        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.text, "URL copied to clipboard for sharing");
    }

    #[test]
    fn test_share_success_confirms() {
        let mut app = generated_app("shared");

        let _ = app.update(Message::ShareFinished(Ok(ShareOutcome::Shared)));

        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text, "QR code shared successfully!");
    }

    #[test]
    fn test_notice_expiry_clears_the_slot() {
        let mut app = QrStudio::default();
        app.notice = Some(Notice::success("about to go"));
        let shown = app.notice.as_ref().unwrap().shown_at;

        let _ = app.update(Message::NoticeTick(shown + Duration::from_secs(1)));
        assert!(app.notice.is_some());

        let _ = app.update(Message::NoticeTick(shown + NOTICE_DURATION));
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_replacement_notice_gets_its_own_lifetime() {
        let mut app = generated_app("payload");

        // Age the generation notice to the edge of its deadline
        let aged = Instant::now() - Duration::from_secs(2);
        app.notice.as_mut().unwrap().shown_at = aged;

        let _ = app.update(Message::ThemeToggled);

        // A tick on the old notice's schedule spares the replacement
        let _ = app.update(Message::NoticeTick(aged + NOTICE_DURATION));
        assert!(app.notice.is_some());

        let second_shown = app.notice.as_ref().unwrap().shown_at;
        let _ = app.update(Message::NoticeTick(second_shown + NOTICE_DURATION));
        assert!(app.notice.is_none());
    }
}
