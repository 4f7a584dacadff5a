/*
[INPUT]:  Email address, one-time password, requested role
[OUTPUT]: Verified user profile and auth errors
[POS]:    Auth layer - handles email OTP authentication
[UPDATE]: When auth flow or verification rules change
*/

pub mod otp;

pub use otp::{OtpAuthManager, validate_email};
