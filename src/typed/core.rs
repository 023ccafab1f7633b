use crate::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
use crate::error::RosterError;
use crate::ids::RequestId;
use crate::router::ParamVec;
use http::Method;
use may::sync::mpsc;
use serde::Serialize;
use std::convert::TryFrom;
use std::io;
use tracing::{debug, error};

/// Trait implemented by typed coroutine handlers.
pub trait Handler: Send + 'static {
    /// Typed request, converted from the raw [`HandlerRequest`]
    type Request: TryFrom<HandlerRequest, Error = RosterError> + Send + 'static;
    /// Typed response, serialized to the JSON body
    type Response: Serialize + Send + 'static;

    /// Status used for successful responses
    const STATUS: u16 = 200;

    fn handle(&self, req: TypedHandlerRequest<Self::Request>) -> Result<Self::Response, RosterError>;
}

/// Request metadata plus the converted request data.
#[derive(Debug, Clone)]
pub struct TypedHandlerRequest<T> {
    pub request_id: RequestId,
    pub method: Method,
    pub path: String,
    pub handler_name: String,
    pub path_params: ParamVec,
    /// Typed request data
    pub data: T,
}

/// Run one request through a typed handler and build the wire response.
fn respond<H: Handler>(handler: &H, req: HandlerRequest) -> HandlerResponse {
    let request_id = req.request_id;
    let method = req.method.clone();
    let path = req.path.clone();
    let handler_name = req.handler_name.clone();
    let path_params = req.path_params.clone();

    let data = match H::Request::try_from(req) {
        Ok(data) => data,
        Err(err) => {
            debug!(request_id = %request_id, error = %err, "Request conversion failed");
            return err.to_response();
        }
    };
    let typed = TypedHandlerRequest {
        request_id,
        method,
        path,
        handler_name,
        path_params,
        data,
    };
    match handler.handle(typed) {
        Ok(response) => match serde_json::to_value(response) {
            Ok(body) => HandlerResponse::json(H::STATUS, body),
            Err(e) => {
                error!(request_id = %request_id, error = %e, "Failed to serialize response");
                HandlerResponse::error(500, "Failed to serialize response")
            }
        },
        Err(err) => err.to_response(),
    }
}

/// Spawn a typed handler coroutine and return the sender feeding it.
///
/// # Errors
///
/// Returns the spawn error if the coroutine could not be created.
///
/// # Safety
///
/// Spawns a `may` coroutine; the handler must not hold thread-local state
/// across yields.
pub unsafe fn spawn_typed<H>(handler: H) -> io::Result<mpsc::Sender<HandlerRequest>>
where
    H: Handler,
{
    let (tx, rx) = mpsc::channel::<HandlerRequest>();

    // SAFETY: forwarded to the caller, see the function docs.
    unsafe {
        may::coroutine::Builder::new()
            .stack_size(may::config().get_stack_size())
            .spawn(move || {
                for req in rx.iter() {
                    let reply_tx = req.reply_tx.clone();
                    let handler_name = req.handler_name.clone();
                    let response = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        respond(&handler, req)
                    }))
                    .unwrap_or_else(|panic| {
                        error!(handler_name = %handler_name, panic = ?panic, "Handler panicked");
                        HandlerResponse::error(500, "Handler panicked")
                    });
                    if reply_tx.send(response).is_err() {
                        debug!(handler_name = %handler_name, "Reply receiver dropped");
                    }
                }
            })?;
    }

    Ok(tx)
}

impl Dispatcher {
    /// Spawn a typed handler and register it under `name`.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the coroutine could not be created.
    ///
    /// # Safety
    ///
    /// Same requirements as [`spawn_typed`].
    pub unsafe fn register_typed<H>(&mut self, name: &str, handler: H) -> io::Result<()>
    where
        H: Handler,
    {
        // SAFETY: forwarded to the caller.
        let tx = unsafe { spawn_typed(handler)? };
        self.handlers.insert(name.to_string(), tx);
        Ok(())
    }
}
