mod contact_flow;
mod headless;
mod host_config;
