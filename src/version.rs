/// Version string baked in by `build.rs`.
pub const GIT_VERSION: &str = env!("GIT_VERSION");
