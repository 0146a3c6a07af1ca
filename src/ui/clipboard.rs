use crate::ui::Clipboard;
use anyhow::{Context, Result};
use log::debug;

/// System clipboard. The handle is kept so the contents survive for the
/// lifetime of a session on platforms where the owner must stay alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().context("clipboard unavailable")?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard.set_text(text.to_string())?;
            debug!("SystemClipboard: wrote {} byte(s)", text.len());
        }
        Ok(())
    }
}
