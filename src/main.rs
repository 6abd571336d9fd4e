use stress_test::{run_stress_test, stress_test_scaling, StressConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("\n\n╔════════════════════════════════════════════════════════════╗");
    println!("║            TRANSFORM STRESS TESTS                          ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    let config = StressConfig::from_env();
    tracing::info!(?config, "starting stress run");

    let stats = run_stress_test(&config).await;
    stats.print();

    println!("\n\n╔════════════════════════════════════════════════════════════╗");
    println!("║          SCALING ANALYSIS (tasks)                          ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    let scaling_divergences = stress_test_scaling(&config, 4).await;

    let divergences = stats.divergences + scaling_divergences;
    if divergences > 0 {
        tracing::error!(divergences, "replicas diverged");
        std::process::exit(1);
    }

    println!("\n✓ All stress tests completed successfully!");
}
