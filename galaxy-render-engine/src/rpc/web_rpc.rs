use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use point_field::controls::descriptor;
use point_field::{CONTROLS, ControlKind, GalaxyPreset, ParameterField, ParameterValue};
use serde::{Deserialize, Serialize};

use crate::engine::galaxy::events::{
    GalaxyRegeneratedEvent, InputPhase, LoadParametersEvent, ParameterInputEvent,
    RegenerateGalaxyEvent,
};
use crate::engine::galaxy::state::GalaxyState;
use crate::engine::systems::fps_tracking::smoothed_fps;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the embedding page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the WebRPC layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_galaxy_regenerated,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
            return;
        }
    }

    // Hand ownership to JS so the listener outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    galaxy: Option<Res<GalaxyState>>,
    mut input_events: EventWriter<ParameterInputEvent>,
    mut regenerate_events: EventWriter<RegenerateGalaxyEvent>,
    mut load_events: EventWriter<LoadParametersEvent>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let mut handlers = RpcHandlers {
                    diagnostics: &diagnostics,
                    galaxy: galaxy.as_deref(),
                    input_events: &mut input_events,
                    regenerate_events: &mut regenerate_events,
                    load_events: &mut load_events,
                };
                if let Some(response) = handle_rpc_request(&request, &mut handlers) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Ignoring malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Everything request handlers read from or write to.
struct RpcHandlers<'a, 'wi, 'wr, 'wl> {
    diagnostics: &'a DiagnosticsStore,
    galaxy: Option<&'a GalaxyState>,
    input_events: &'a mut EventWriter<'wi, ParameterInputEvent>,
    regenerate_events: &'a mut EventWriter<'wr, RegenerateGalaxyEvent>,
    load_events: &'a mut EventWriter<'wl, LoadParametersEvent>,
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(request: &RpcRequest, handlers: &mut RpcHandlers) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone();

    let result = match request.method.as_str() {
        "get_parameters" => handle_get_parameters(handlers.galaxy),
        "get_controls" => Ok(controls_json()),
        // Input events are only consumed once the galaxy is running.
        "stage_parameter" => require_galaxy(handlers.galaxy).and_then(|_| {
            handle_parameter_input(&request.params, InputPhase::Drag, handlers.input_events)
        }),
        "commit_parameter" => require_galaxy(handlers.galaxy).and_then(|_| {
            handle_parameter_input(&request.params, InputPhase::Commit, handlers.input_events)
        }),
        "regenerate" => require_galaxy(handlers.galaxy)
            .and_then(|_| handle_regenerate(&request.params, handlers.regenerate_events)),
        "load_preset" => require_galaxy(handlers.galaxy)
            .and_then(|_| handle_load_preset(&request.params, handlers.load_events)),
        "get_fps" => Ok(serde_json::json!({
            "fps": smoothed_fps(handlers.diagnostics).unwrap_or(0.0) as f32
        })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return id.map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = id?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn require_galaxy(galaxy: Option<&GalaxyState>) -> Result<&GalaxyState, RpcError> {
    galaxy.ok_or_else(|| RpcError::internal_error("Galaxy is still loading"))
}

fn handle_get_parameters(galaxy: Option<&GalaxyState>) -> Result<serde_json::Value, RpcError> {
    let galaxy = require_galaxy(galaxy)?;
    let parameters = serde_json::to_value(galaxy.context.parameters())
        .map_err(|e| RpcError::internal_error(&e.to_string()))?;

    Ok(serde_json::json!({
        "parameters": parameters,
        "seed": galaxy.seed,
        "generation": galaxy.context.generation(),
        "pointCount": galaxy.context.live_point_count(),
        "elapsed": galaxy.clock.elapsed(),
    }))
}

/// Control descriptors the page builds its settings panel from.
fn controls_json() -> serde_json::Value {
    let controls: Vec<serde_json::Value> = CONTROLS
        .iter()
        .map(|control| match control.kind {
            ControlKind::Slider(range) => serde_json::json!({
                "field": control.field.key(),
                "label": control.label,
                "kind": "slider",
                "min": range.min,
                "max": range.max,
                "step": range.step,
                "regenerates": control.regenerates(),
            }),
            ControlKind::Color => serde_json::json!({
                "field": control.field.key(),
                "label": control.label,
                "kind": "color",
                "regenerates": control.regenerates(),
            }),
        })
        .collect();
    serde_json::Value::Array(controls)
}

/// Parse `{ "field": "...", "value": number | "#rrggbb" }` and normalise the
/// value against the control's range.
fn parse_parameter_input(
    params: &serde_json::Value,
) -> Result<(ParameterField, ParameterValue), RpcError> {
    #[derive(Deserialize)]
    struct ParameterParams {
        field: String,
        value: ParameterValue,
    }

    let parsed = serde_json::from_value::<ParameterParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'field' and 'value' parameters"))?;

    let field = ParameterField::from_key(&parsed.field)
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;
    let value = descriptor(field)
        .normalize(parsed.value)
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;

    Ok((field, value))
}

fn handle_parameter_input(
    params: &serde_json::Value,
    phase: InputPhase,
    input_events: &mut EventWriter<ParameterInputEvent>,
) -> Result<serde_json::Value, RpcError> {
    let (field, value) = parse_parameter_input(params)?;

    input_events.write(ParameterInputEvent {
        field,
        value,
        phase,
    });

    Ok(serde_json::json!({
        "field": field.key(),
        "value": value,
        "regenerates": phase == InputPhase::Commit && field.regenerates(),
    }))
}

fn handle_regenerate(
    params: &serde_json::Value,
    regenerate_events: &mut EventWriter<RegenerateGalaxyEvent>,
) -> Result<serde_json::Value, RpcError> {
    let reroll_seed = params
        .get("reroll")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    regenerate_events.write(RegenerateGalaxyEvent { reroll_seed });
    info!("Regeneration requested over RPC (reroll: {})", reroll_seed);

    Ok(serde_json::json!({
        "success": true,
        "reroll": reroll_seed
    }))
}

/// Parse a preset object shaped like the preset files. The background shell
/// is built once at startup, so its settings are ignored here.
fn parse_load_preset(params: &serde_json::Value) -> Result<LoadParametersEvent, RpcError> {
    let preset = serde_json::from_value::<GalaxyPreset>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected a preset object"))?;
    preset
        .parameters
        .validate()
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;

    Ok(LoadParametersEvent {
        parameters: preset.parameters,
        seed: preset.seed,
    })
}

fn handle_load_preset(
    params: &serde_json::Value,
    load_events: &mut EventWriter<LoadParametersEvent>,
) -> Result<serde_json::Value, RpcError> {
    let event = parse_load_preset(params)?;
    let seed = event.seed;
    load_events.write(event);
    info!("Preset load requested over RPC (seed: {:?})", seed);

    Ok(serde_json::json!({
        "success": true,
        "seed": seed
    }))
}

/// Push a `galaxy_regenerated` notification for every completed rebuild.
fn notify_galaxy_regenerated(
    mut regenerated: EventReader<GalaxyRegeneratedEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in regenerated.read() {
        rpc_interface.send_notification(
            "galaxy_regenerated",
            serde_json::json!({
                "count": event.report.point_count,
                "seconds": event.seconds,
                "generation": event.report.generation,
            }),
        );
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use point_field::Rgb;

    #[test]
    fn parameter_input_is_normalised() {
        let (field, value) =
            parse_parameter_input(&serde_json::json!({"field": "branches", "value": 3.6})).unwrap();
        assert_eq!(field, ParameterField::Branches);
        assert_eq!(value, ParameterValue::Number(4.0));

        let (field, value) = parse_parameter_input(
            &serde_json::json!({"field": "outsideColor", "value": "#1b3984"}),
        )
        .unwrap();
        assert_eq!(field, ParameterField::OutsideColor);
        assert_eq!(
            value,
            ParameterValue::Color(Rgb::from_hex("#1b3984").unwrap())
        );
    }

    #[test]
    fn bad_parameter_input_is_invalid_params() {
        for params in [
            serde_json::json!({"field": "warp", "value": 1.0}),
            serde_json::json!({"field": "count", "value": "#ffffff"}),
            serde_json::json!({"field": "insideColor", "value": 2.0}),
            serde_json::json!({"value": 2.0}),
        ] {
            let err = parse_parameter_input(&params).unwrap_err();
            assert_eq!(err.code, -32602, "params {}", params);
        }
    }

    #[test]
    fn controls_describe_every_field() {
        let controls = controls_json();
        let controls = controls.as_array().unwrap();
        assert_eq!(controls.len(), ParameterField::ALL.len());

        let count = &controls[0];
        assert_eq!(count["field"], "count");
        assert_eq!(count["kind"], "slider");
        assert_eq!(count["step"], 100.0);

        let speed = controls
            .iter()
            .find(|c| c["field"] == "rotationSpeed")
            .unwrap();
        assert_eq!(speed["label"], "Rotation Speed");
        assert_eq!(speed["regenerates"], false);
    }

    #[test]
    fn requests_without_params_parse() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_fps","id":1}"#).unwrap();
        assert!(request.params.is_null());
    }

    #[test]
    fn parameters_need_a_loaded_galaxy() {
        let err = handle_get_parameters(None).unwrap_err();
        assert_eq!(err.code, -32603);
    }

    fn rpc_world() -> World {
        let mut world = World::new();
        world.init_resource::<DiagnosticsStore>();
        world.init_resource::<Events<ParameterInputEvent>>();
        world.init_resource::<Events<RegenerateGalaxyEvent>>();
        world.init_resource::<Events<LoadParametersEvent>>();
        world
    }

    fn dispatch(world: &mut World, request: serde_json::Value) -> RpcResponse {
        let request: RpcRequest = serde_json::from_value(request).unwrap();
        world
            .run_system_once(
                move |diagnostics: Res<DiagnosticsStore>,
                      galaxy: Option<Res<GalaxyState>>,
                      mut input_events: EventWriter<ParameterInputEvent>,
                      mut regenerate_events: EventWriter<RegenerateGalaxyEvent>,
                      mut load_events: EventWriter<LoadParametersEvent>| {
                    let mut handlers = RpcHandlers {
                        diagnostics: &diagnostics,
                        galaxy: galaxy.as_deref(),
                        input_events: &mut input_events,
                        regenerate_events: &mut regenerate_events,
                        load_events: &mut load_events,
                    };
                    handle_rpc_request(&request, &mut handlers)
                },
            )
            .unwrap()
            .unwrap()
    }

    fn queued_events(world: &World) -> usize {
        world.resource::<Events<ParameterInputEvent>>().len()
            + world.resource::<Events<RegenerateGalaxyEvent>>().len()
            + world.resource::<Events<LoadParametersEvent>>().len()
    }

    #[test]
    fn mutating_methods_fail_while_loading() {
        let mut world = rpc_world();
        for (method, params) in [
            ("stage_parameter", serde_json::json!({"field": "spin", "value": 2.0})),
            ("commit_parameter", serde_json::json!({"field": "spin", "value": 2.0})),
            ("regenerate", serde_json::json!({"reroll": true})),
            ("load_preset", serde_json::json!({"seed": 3})),
        ] {
            let response = dispatch(
                &mut world,
                serde_json::json!({"jsonrpc": "2.0", "method": method, "params": params, "id": 1}),
            );
            assert_eq!(response.error.map(|e| e.code), Some(-32603), "{}", method);
        }
        assert_eq!(queued_events(&world), 0);
    }

    #[test]
    fn running_galaxy_accepts_input() {
        let mut world = rpc_world();
        let root = world.spawn(Transform::default()).id();
        world.insert_resource(GalaxyState::new(Default::default(), 1, root));

        let response = dispatch(
            &mut world,
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "commit_parameter",
                "params": {"field": "branches", "value": 6},
                "id": 2
            }),
        );
        assert!(response.error.is_none());
        assert_eq!(response.result.unwrap()["regenerates"], true);

        let response = dispatch(
            &mut world,
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "load_preset",
                "params": {"seed": 9, "parameters": {"count": 2000}},
                "id": 3
            }),
        );
        assert_eq!(response.result.unwrap()["seed"], 9);
        assert_eq!(queued_events(&world), 2);

        let response = dispatch(
            &mut world,
            serde_json::json!({"jsonrpc": "2.0", "method": "get_parameters", "id": 4}),
        );
        assert_eq!(response.result.unwrap()["elapsed"], 0.0);
    }

    #[test]
    fn invalid_presets_are_invalid_params() {
        let err = parse_load_preset(&serde_json::json!({"parameters": {"radius": -1.0}}))
            .unwrap_err();
        assert_eq!(err.code, -32602);

        let err = parse_load_preset(&serde_json::json!("galaxy")).unwrap_err();
        assert_eq!(err.code, -32602);

        let event = parse_load_preset(&serde_json::json!({"parameters": {"branches": 7}}))
            .unwrap();
        assert_eq!(event.parameters.branches, 7);
        assert_eq!(event.seed, None);
    }
}
