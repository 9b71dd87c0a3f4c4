#[tokio::main]
async fn main() -> anyhow::Result<()> {
    second_brain_backend::run().await
}
