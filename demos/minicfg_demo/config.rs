//! Configuration declaration for the minicfg demo application.
//!
//! A three-level tree: the root `DEMO` group owns a couple of scalar fields
//! and two child groups, [`server`] and [`display`].
//!
//! # Env var mapping
//!
//! | Env var                        | Declared key            |
//! |--------------------------------|-------------------------|
//! | `DEMO_NAME`                    | `NAME`                  |
//! | `DEMO_VERBOSE`                 | `VERBOSE`               |
//! | `DEMO_SERVER_HOST`             | `Server.HOST`           |
//! | `DEMO_SERVER_PORT`             | `Server.PORT`           |
//! | `DEMO_SERVER_TOKEN` / `_FILE`  | `Server.TOKEN`          |
//! | `DEMO_SERVER_ALLOWED_ORIGINS`  | `Server.ALLOWED_ORIGINS`|
//! | `DEMO_DISPLAY_COLOR`           | `Display.COLOR`         |
//! | `DEMO_DISPLAY_LABELS`          | `Display.LABELS`        |

use minicfg::{BoolCaster, Field, IntCaster, JsonCaster, ListCaster, Minicfg};
use serde::Deserialize;

/// Root declaration for the demo application.
pub fn demo_config() -> Minicfg {
    Minicfg::new()
        .name("DEMO")
        .field(
            "NAME",
            Field::new()
                .default("minicfg-demo")
                .description("application name shown in the banner"),
        )
        .field(
            "VERBOSE",
            Field::new()
                .caster(BoolCaster)
                .default(false)
                .description("print where every value came from"),
        )
        .child("Server", server())
        .child("Display", display())
}

fn server() -> Minicfg {
    Minicfg::new()
        .name("SERVER")
        .field(
            "HOST",
            Field::new().default("127.0.0.1").description("hostname to bind to"),
        )
        .field(
            "PORT",
            Field::new()
                .caster(IntCaster)
                .default(8080)
                .description("port to listen on"),
        )
        .field(
            "TOKEN",
            Field::new()
                .description("API token, usually mounted as a secret file")
                .attach_file_field(),
        )
        .field(
            "ALLOWED_ORIGINS",
            Field::new()
                .caster(ListCaster::new())
                .default(Vec::<&str>::new())
                .description("comma-separated CORS origins"),
        )
}

fn display() -> Minicfg {
    Minicfg::new()
        .name("DISPLAY")
        .field(
            "COLOR",
            Field::new()
                .default("yellow")
                .description("banner color (red, green, yellow, blue)"),
        )
        .field(
            "LABELS",
            Field::new()
                .caster(JsonCaster::new())
                .default(serde_json::json!({}))
                .description("extra labels as a JSON object"),
        )
}

/// Typed projection of the populated tree.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DemoConfig {
    pub name: String,
    pub verbose: bool,
    #[serde(rename = "Server")]
    pub server: ServerConfig,
    #[serde(rename = "Display")]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub token: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DisplayConfig {
    pub color: String,
    pub labels: serde_json::Value,
}
