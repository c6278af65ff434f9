use anyhow::{Context, Result};
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use std::path::Path;
use tracing::info;

/// Headless Chrome screenshots of a rendered map page
pub struct PagePreview {
    browser: Browser,
}

impl PagePreview {
    pub fn new() -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((1200, 1400)))
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        Ok(Self { browser })
    }

    /// Open `page` from disk and save a PNG of it to `target`
    pub fn capture(&self, page: &Path, target: &Path) -> Result<()> {
        let absolute = page
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", page.display()))?;
        let url = format!("file://{}", absolute.display());

        let tab = self.browser.new_tab()?;
        tab.navigate_to(&url)?;
        tab.wait_until_navigated()?;

        let png = tab.capture_screenshot(
            Page::CaptureScreenshotFormatOption::Png,
            None,
            None,
            true,
        )?;
        std::fs::write(target, png)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        info!("📸 Saved screenshot to {}", target.display());

        Ok(())
    }
}
