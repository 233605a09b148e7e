use anyhow::{ensure, Context};
use ferrumcache::{Cache, CacheConfig, ParseInt, Raw, StoreValue, Utf8};
use tracing::info;

/// Store each sample, read it back with the matching conversion, and check it
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    let config = CacheConfig::default();
    info!("FerrumCache demo against {}", config.addr());

    let cache = Cache::connect(&config)
        .await
        .with_context(|| format!("cannot reach store at {}", config.addr()))?;
    cache.inner().ping().await.context("store did not answer PING")?;

    let key = cache.store(b"foo").await?;
    let raw = cache.get_with(&key, Raw).await?;
    ensure!(raw.as_deref() == Some(&b"foo"[..]), "bytes round trip failed: {:?}", raw);
    info!("{} -> {:?}", key, raw);

    let key = cache.store(123).await?;
    let int = cache.get_with(&key, ParseInt).await?;
    ensure!(int == Some(123), "integer round trip failed: {:?}", int);
    info!("{} -> {:?}", key, int);

    let key = cache.store(StoreValue::from("bar")).await?;
    let text = cache.get_with(&key, Utf8).await?;
    ensure!(text.as_deref() == Some("bar"), "text round trip failed: {:?}", text);
    info!("{} -> {:?}", key, text);

    let missing = cache.get("nonexistent-key").await?;
    ensure!(missing.is_none(), "unknown key returned {:?}", missing);

    info!("All round trips passed");
    Ok(())
}
