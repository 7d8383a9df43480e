pub mod email;
pub mod signup;
pub mod submission;
