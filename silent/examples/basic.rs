use silent::*;

/// config lookup that may be missing
#[silent(fallback = 30, message = "reading timeout")]
fn timeout_secs(raw: &str) -> Result<u64, Fault> {
    Ok(raw.parse()?)
}

/// cache warmup nobody needs to hear about
#[silent(quiet = true)]
fn warm_cache(keys: &[&str]) -> Result<usize, Fault> {
    if keys.is_empty() {
        bail!("nothing to warm");
    }
    Ok(keys.len())
}

fn main() {
    tracing_subscriber::fmt().with_target(true).init();

    println!("silent examples:\n");

    println!("1. attribute with fallback:");
    println!("   timeout_secs(\"5\") = {}", timeout_secs("5"));
    println!("   timeout_secs(\"soon\") = {}", timeout_secs("soon"));

    println!("\n2. quiet attribute:");
    println!("   warm_cache([]) = {}", warm_cache(&[]));

    println!("\n3. builder with data and level:");
    let ratio = attempt()
        .with_message("ratio failed")
        .with_data_entry("numerator", 10)
        .with_log_level("warning")
        .exec(
            |_| -> Result<i32, Fault> {
                let denominator = "0".parse::<i32>()?;
                10_i32
                    .checked_div(denominator)
                    .ok_or_else(|| fault!("divide by zero"))
            },
            0,
        );
    println!("   ratio = {ratio}");

    println!("\n4. panics are caught too:");
    let names = vec!["a", "b"];
    let picked = attempt().exec(|_| Ok::<_, Fault>(names[names.len()]), "none");
    println!("   picked = {picked}");
}
