pub mod ai;
pub mod campaign;

pub async fn health() -> &'static str {
    "OK"
}
