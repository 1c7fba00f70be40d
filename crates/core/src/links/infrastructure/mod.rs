pub mod vault_link_resolver;
