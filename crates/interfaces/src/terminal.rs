use crate::traits::Interface;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

pub struct TerminalInterface {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalInterface {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    async fn write(&self, text: &str, newline: bool) {
        let mut stdout = tokio::io::stdout();
        let _ = stdout.write_all(text.as_bytes()).await;
        if newline {
            let _ = stdout.write_all(b"\n").await;
        }
        let _ = stdout.flush().await;
    }
}

impl Default for TerminalInterface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interface for TerminalInterface {
    async fn receive_input(&self) -> Option<String> {
        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(Some(line)) => Some(line.trim().to_string()),
            Ok(None) => None, // EOF
            Err(_) => None,
        }
    }

    async fn send_output(&self, message: &str) {
        self.write(message, true).await;
    }

    async fn show_status(&self, status: &str) {
        self.write(&format!("ℹ️  {}", status), true).await;
    }

    async fn show_prompt(&self, prompt: &str) {
        self.write(prompt, false).await;
    }
}
