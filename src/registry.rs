// Handler registry: binds every route's handler name to its controller.
use crate::dispatcher::Dispatcher;
use crate::handlers::add_student::AddStudentController;
use crate::handlers::count_students::CountStudentsController;
use crate::handlers::get_student::GetStudentController;
use crate::handlers::list_students::ListStudentsController;
use crate::routes::{RouteMeta, ADD_STUDENT, COUNT_STUDENTS, GET_STUDENT, LIST_STUDENTS};
use crate::store::RosterStore;
use crate::typed::spawn_typed;
use anyhow::{bail, Result};
use std::sync::Arc;

/// Spawn a controller for each route, all sharing `store`.
///
/// # Errors
///
/// Fails on a handler name with no controller, or if a coroutine cannot be
/// spawned.
///
/// # Safety
///
/// Spawns `may` coroutines; see [`spawn_typed`].
pub unsafe fn register_from_routes(
    dispatcher: &mut Dispatcher,
    routes: &[RouteMeta],
    store: &Arc<dyn RosterStore>,
) -> Result<()> {
    for route in routes {
        let store = Arc::clone(store);
        // SAFETY: forwarded to the caller.
        let tx = unsafe {
            match route.handler_name.as_str() {
                LIST_STUDENTS => spawn_typed(ListStudentsController { store })?,
                COUNT_STUDENTS => spawn_typed(CountStudentsController { store })?,
                ADD_STUDENT => spawn_typed(AddStudentController { store })?,
                GET_STUDENT => spawn_typed(GetStudentController { store })?,
                other => bail!("no controller for handler '{other}'"),
            }
        };
        dispatcher.add_route(route, tx);
    }
    Ok(())
}
