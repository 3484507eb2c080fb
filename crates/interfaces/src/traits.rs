use async_trait::async_trait;

#[async_trait]
pub trait Interface: Send + Sync {
    /// Next line of input, trimmed. `None` once input is exhausted.
    async fn receive_input(&self) -> Option<String>;
    async fn send_output(&self, message: &str);
    async fn show_status(&self, status: &str);
    async fn show_prompt(&self, prompt: &str);
}
