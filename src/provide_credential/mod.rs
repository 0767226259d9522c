mod r#static;
pub use r#static::StaticCredentialProvider;

mod env;
pub use env::EnvCredentialProvider;

mod chain;
pub use chain::ProvideCredentialChain;

mod default;
pub use default::DefaultCredentialProvider;
