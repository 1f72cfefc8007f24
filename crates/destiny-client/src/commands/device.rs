use crate::state::AppState;

/// Print this device's token, creating it if needed.
pub fn show(state: &AppState, json: bool) -> anyhow::Result<()> {
    let token = state.device_id()?;
    if json {
        println!("{}", serde_json::json!({ "device": token }));
    } else {
        println!("{token}");
    }
    Ok(())
}
