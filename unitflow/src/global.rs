//! Process-wide converter
//!
//! A shared `Converter` created lazily on first use and guarded by one mutex.
//! `load` starts it empty; `verify_unit`, `is_valid` and `with` start it with
//! the whole default library. `reset` drops it so the next call starts over.

use std::cell::Cell;
use std::sync::{Mutex, MutexGuard, PoisonError};

use unitflow_core::Result;

use crate::{Converter, UnitSource};

static GLOBAL: Mutex<Option<Converter>> = Mutex::new(None);

thread_local! {
    // set while this thread runs a `with` closure and holds GLOBAL
    static INSIDE_WITH: Cell<bool> = const { Cell::new(false) };
}

fn lock() -> MutexGuard<'static, Option<Converter>> {
    if INSIDE_WITH.with(Cell::get) {
        panic!("unitflow::global used from inside global::with; use the converter passed to the closure");
    }
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears `INSIDE_WITH` on every exit from `with`, unwinding included
struct WithScope;

impl Drop for WithScope {
    fn drop(&mut self) {
        INSIDE_WITH.with(|inside| inside.set(false));
    }
}

/// Load units into the shared converter, creating it empty if needed
pub fn load(units: impl Into<UnitSource>, overwrite: bool) -> Result<()> {
    let mut guard = lock();
    guard.get_or_insert_with(Converter::empty).load(units, overwrite)?;
    Ok(())
}

/// Clear units from the shared converter; does nothing before first use
pub fn clear(group: Option<&str>) {
    if let Some(converter) = lock().as_mut() {
        converter.clear(group);
    }
}

/// Display label of `unit`; before first use this is `unit` itself
pub fn display(unit: &str) -> String {
    match lock().as_ref() {
        Some(converter) => converter.display(unit),
        None => unit.to_string(),
    }
}

pub fn verify_unit(unit: &str) -> Result<()> {
    with(|converter| converter.verify_unit(unit))
}

pub fn is_valid(unit: &str) -> bool {
    with(|converter| converter.is_valid(unit))
}

/// Run `f` against the shared converter, creating it with the default library
/// if needed. The lock is held for the duration of `f`.
///
/// # Panics
///
/// If `f` calls back into this module (`load`, `clear`, `display`,
/// `verify_unit`, `is_valid`, `with`, `is_initialized` or `reset`). Work on the
/// `&mut Converter` handed to `f` instead.
pub fn with<R>(f: impl FnOnce(&mut Converter) -> R) -> R {
    let mut guard = lock();
    INSIDE_WITH.with(|inside| inside.set(true));
    let _scope = WithScope;
    f(guard.get_or_insert_with(Converter::new))
}

pub fn is_initialized() -> bool {
    lock().is_some()
}

/// Drop the shared converter
pub fn reset() {
    lock().take();
}
