/*
[INPUT]:  AMDASH_EMAIL and AMDASH_ROLE environment variables, OTP on stdin
[OUTPUT]: Verified user profile
[POS]:    Examples - email OTP authentication flow
[UPDATE]: When auth flow changes
*/

use std::io::BufRead;

use amdash_adapter::*;

/// Example: request an OTP, read it from stdin, verify and check the role
#[tokio::main]
async fn main() {
    println!("=== amdash OTP Login Example ===\n");

    let email = std::env::var("AMDASH_EMAIL").unwrap_or_else(|_| "mentee@example.com".to_string());
    let role: Role = std::env::var("AMDASH_ROLE")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(Role::Mentee);

    let client = match AmdashClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    let auth = OtpAuthManager::new(client);

    println!("Requesting OTP for {}...", email);
    if let Err(e) = auth.send_otp(&email).await {
        println!("✗ Error: {}", e);
        return;
    }
    println!("✓ OTP sent, enter it below:");

    let mut otp = String::new();
    if std::io::stdin().lock().read_line(&mut otp).is_err() {
        println!("✗ Could not read OTP");
        return;
    }

    match auth.login(&email, &otp, role).await {
        Ok(user) => println!("✓ Logged in as {} <{}> ({})", user.name, user.email, user.role),
        Err(e) => println!("✗ Login failed: {}", e),
    }
}
