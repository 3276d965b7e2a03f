use crate::domain::ports::FormDriver;
use crate::utils::error::{Result, TaskError};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};

/// WebDriver-backed browser session. One session is opened per run and
/// reused serially across rows.
pub struct WebDriverSession {
    client: Option<Client>,
}

impl WebDriverSession {
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self> {
        let mut caps = serde_json::map::Map::new();
        if headless {
            caps.insert(
                "goog:chromeOptions".to_string(),
                serde_json::json!({ "args": ["--headless=new", "--disable-gpu"] }),
            );
        }

        tracing::debug!("Connecting to WebDriver at {}", webdriver_url);
        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;

        Ok(Self {
            client: Some(client),
        })
    }

    fn client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or_else(|| TaskError::ProcessingError {
            message: "Browser session already closed".to_string(),
        })
    }
}

#[async_trait]
impl FormDriver for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.client()?.goto(url).await?;
        Ok(())
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<()> {
        let element = self.client()?.find(Locator::Css(selector)).await?;
        element.clear().await?;
        element.send_keys(value).await?;
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        let element = self.client()?.find(Locator::Css(selector)).await?;
        element.click().await?;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str) -> Result<()> {
        self.client()?
            .wait()
            .for_element(Locator::Css(selector))
            .await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            client.close().await?;
        }
        Ok(())
    }
}
