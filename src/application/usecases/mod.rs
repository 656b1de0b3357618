pub mod inspect_config;
pub mod pin_dependency;
pub mod resolve_commit;
