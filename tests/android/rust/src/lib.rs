//! Android JNI test harness for the messagekit permission gate.
//!
//! This crate is only compiled for Android targets.
//! To build: cargo ndk -t arm64-v8a build -p messagekit-test-android
//!
//! Each export matches a `native` declaration in the instrumentation
//! `MainActivity`. `testInit` binds the one gate the activity uses; the
//! activity forwards its `onRequestPermissionsResult` callback to
//! `testOnRequestPermissionsResult`. `testAwaitOutcome` blocks and must come
//! from a worker thread.

#![cfg(target_os = "android")]
#![allow(non_snake_case)]

use jni::JNIEnv;
use jni::objects::{JClass, JIntArray, JObject, JObjectArray};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jint};
use messagekit_permission::sys::android::{AndroidHost, outcome_from_java};
use messagekit_permission::{PendingRequest, PermissionGate};
use std::sync::{Mutex, PoisonError};

/// The gate bound to the running activity.
static GATE: Mutex<Option<PermissionGate<AndroidHost>>> = Mutex::new(None);
/// The last request still waiting for its outcome.
static PENDING: Mutex<Option<PendingRequest>> = Mutex::new(None);

fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("messagekit"),
    );
}

/// Run `f` against the bound gate, or return `fallback` if there is none.
fn with_gate<T>(fallback: T, f: impl FnOnce(&PermissionGate<AndroidHost>) -> T) -> T {
    let gate = GATE.lock().unwrap_or_else(PoisonError::into_inner);
    match gate.as_ref() {
        Some(gate) => f(gate),
        None => {
            log::error!("no gate bound; call testInit first");
            fallback
        }
    }
}

const fn to_jboolean(value: bool) -> jboolean {
    if value { JNI_TRUE } else { JNI_FALSE }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Binds a gate to `activity`, replacing any previous one.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_messagekit_test_MainActivity_testInit(
    mut env: JNIEnv,
    _class: JClass,
    activity: JObject,
) -> jboolean {
    init_logging();

    let host = match AndroidHost::new(&mut env, &activity) {
        Ok(host) => host,
        Err(e) => {
            log::error!("cannot bind host: {e}");
            return JNI_FALSE;
        }
    };

    *GATE.lock().unwrap_or_else(PoisonError::into_inner) = Some(PermissionGate::new(host));
    *PENDING.lock().unwrap_or_else(PoisonError::into_inner) = None;
    JNI_TRUE
}

// ============================================================================
// Permission gate
// ============================================================================

/// Returns true when contacts, SMS or phone state is still missing.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_messagekit_test_MainActivity_testNeedsMainPermissions(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    with_gate(JNI_FALSE, |gate| to_jboolean(gate.needs_main_permissions()))
}

/// Issues the main permission request (request code 1) and keeps its handle
/// for `testAwaitOutcome`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_messagekit_test_MainActivity_testRequestMainPermissions(
    _env: JNIEnv,
    _class: JClass,
) {
    let pending = with_gate(None, |gate| Some(gate.request_main_permissions()));
    if pending.is_some() {
        *PENDING.lock().unwrap_or_else(PoisonError::into_inner) = pending;
    }
}

/// Forwards an `onRequestPermissionsResult` payload to the gate and returns
/// its verdict. Called on the UI thread; never blocks.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_messagekit_test_MainActivity_testOnRequestPermissionsResult(
    mut env: JNIEnv,
    _class: JClass,
    request_code: jint,
    permissions: JObjectArray,
    grant_results: JIntArray,
) -> jboolean {
    let outcome = match outcome_from_java(&mut env, request_code, &permissions, &grant_results) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("cannot read permission result: {e}");
            return JNI_FALSE;
        }
    };

    with_gate(JNI_FALSE, |gate| {
        gate.deliver(outcome.clone());
        to_jboolean(gate.handle_permission_result(&outcome))
    })
}

/// Waits for the outcome of the last `testRequestMainPermissions` call.
///
/// Returns the number of granted permissions, or -1 when nothing was pending
/// or the gate went away first.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_messagekit_test_MainActivity_testAwaitOutcome(
    _env: JNIEnv,
    _class: JClass,
) -> jint {
    let Some(pending) = PENDING.lock().unwrap_or_else(PoisonError::into_inner).take() else {
        log::error!("no permission request pending");
        return -1;
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("cannot start runtime: {e}");
            return -1;
        }
    };

    match runtime.block_on(pending.outcome()) {
        Some(outcome) => {
            let granted = outcome.grants.iter().filter(|g| g.is_granted()).count();
            jint::try_from(granted).unwrap_or(jint::MAX)
        }
        None => -1,
    }
}

// ============================================================================
// Default messaging app
// ============================================================================

/// Returns true when this app is the default SMS handler.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_messagekit_test_MainActivity_testIsDefaultSmsApp(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    with_gate(JNI_FALSE, |gate| to_jboolean(gate.is_default_messaging_app()))
}

/// Opens the system "change default SMS app" flow if needed.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_messagekit_test_MainActivity_testRequestDefaultSmsApp(
    _env: JNIEnv,
    _class: JClass,
) {
    with_gate((), PermissionGate::request_default_messaging_app);
}
