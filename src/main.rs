//! RAX Rate Limiter - Demo Driver
//!
//! Exercises the leaky-bucket limiter against scripted traffic patterns.
//! Timestamps are logical values supplied by this driver; the limiter never
//! reads a clock.

use env_logger;
use log::{info, warn};

use rax_rate_limiter::config::PolicyConfig;
use rax_rate_limiter::error::LimiterError;
use rax_rate_limiter::error::handlers::handle_error;
use rax_rate_limiter::{RateLimiter, SharedRateLimiter};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching rate limiter demo...");

    if let Err(e) = run_demo().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run_demo() -> Result<(), LimiterError> {
    println!("Leaky Bucket Rate Limiter");
    println!("=========================\n");

    let policy = PolicyConfig::load().unwrap_or_else(|e| {
        warn!("Falling back to default policy: {}", e);
        PolicyConfig::default()
    });
    let limiter = policy.build_limiter()?;

    println!("Configuration:");
    println!("- Bucket Capacity: {}", limiter.capacity());
    println!("- Leak Rate: {} units/second\n", limiter.leak_rate());

    basic_usage(&limiter)?;
    burst_handling(&limiter)?;
    time_based_leaking(&limiter)?;
    multiple_users(&limiter)?;
    concurrent_requests(&policy).await?;

    Ok(())
}

fn basic_usage(limiter: &RateLimiter) -> Result<(), LimiterError> {
    println!("Basic Usage");
    println!("===========");

    let mut current = limiter.clone();

    for i in 1..=4 {
        let decision = current.admit("raja", 0.0)?;

        println!(
            "Request {}: {}",
            i,
            if decision.admitted { "ALLOWED" } else { "REJECTED" }
        );

        if decision.admitted {
            current = decision.limiter;
            if let Some(info) = current.bucket_snapshot("raja") {
                println!(
                    "   Bucket level: {:.1}/{:.1}",
                    info.current_level, info.capacity
                );
            }
        }
    }
    println!();
    Ok(())
}

fn burst_handling(limiter: &RateLimiter) -> Result<(), LimiterError> {
    println!("Burst Handling");
    println!("==============");

    let mut current = limiter.clone();

    println!("Sending 5 rapid requests at time=0:");
    for i in 1..=5 {
        let decision = current.admit("nitheesh", 0.0)?;

        print!(
            "Request {}: {}",
            i,
            if decision.admitted { "ALLOWED" } else { "REJECTED" }
        );

        if decision.admitted {
            current = decision.limiter;
            if let Some(info) = current.bucket_snapshot("nitheesh") {
                print!(" (level: {:.1})", info.current_level);
            }
        }
        println!();
    }
    println!();
    Ok(())
}

fn time_based_leaking(limiter: &RateLimiter) -> Result<(), LimiterError> {
    println!("Time based Leaking");
    println!("==================");

    let mut current = limiter.clone();

    println!("Filling bucket at time=0:");
    for _ in 0..3 {
        current = current.admit("agila", 0.0)?.limiter;
    }

    if let Some(info) = current.bucket_snapshot("agila") {
        println!(
            "Bucket full: {:.1}/{:.1}\n",
            info.current_level, info.capacity
        );
    }

    for time in [1.0, 2.0, 5.0] {
        let decision = current.admit("agila", time)?;

        println!(
            "Request at time={:.1}: {}",
            time,
            if decision.admitted { "ALLOWED" } else { "REJECTED" }
        );

        if decision.admitted {
            current = decision.limiter;
            if let Some(info) = current.bucket_snapshot("agila") {
                println!("   Bucket level: {:.1}", info.current_level);
            }
        }
    }
    println!();
    Ok(())
}

fn multiple_users(limiter: &RateLimiter) -> Result<(), LimiterError> {
    println!("Multiple Users");
    println!("==============");

    let mut current = limiter.clone();

    for user in ["raja", "nitheesh", "agila"] {
        println!("User '{}' requests:", user);
        for i in 1..=2 {
            let decision = current.admit(user, 0.0)?;

            print!(
                "  Request {}: {}",
                i,
                if decision.admitted { "ALLOWED" } else { "REJECTED" }
            );

            if decision.admitted {
                current = decision.limiter;
                if let Some(info) = current.bucket_snapshot(user) {
                    print!(" (level: {:.1})", info.current_level);
                }
            }
            println!();
        }
    }

    println!("\nFinal bucket states ({} users):", current.policy().user_count);
    for (user_id, info) in current.all_snapshots() {
        println!(
            "  {}: {:.1}/{:.1}",
            user_id, info.current_level, info.capacity
        );
    }
    println!();
    Ok(())
}

async fn concurrent_requests(policy: &PolicyConfig) -> Result<(), LimiterError> {
    println!("Concurrent Requests");
    println!("===================");

    let shared = SharedRateLimiter::from_config(policy)?;
    let mut handles = Vec::new();

    for _ in 0..5 {
        let shared = shared.clone();
        handles.push(tokio::spawn(
            async move { shared.admit("swarm", 0.0).await },
        ));
    }

    let mut admitted = 0;
    for handle in handles {
        match handle.await {
            Ok(Ok(true)) => admitted += 1,
            Ok(Ok(false)) => {}
            Ok(Err(e)) => return Err(e),
            Err(e) => {
                warn!("Admission task failed: {}", e);
            }
        }
    }

    println!("Admitted {} of 5 simultaneous requests", admitted);
    if let Some(info) = shared.bucket_snapshot("swarm").await {
        println!("Final level: {:.1}/{:.1}", info.current_level, info.capacity);
    }
    Ok(())
}
