#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stocklens_lib::run().await
}
