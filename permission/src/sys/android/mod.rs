//! Android host using JNI.
//!
//! Permission checks and requests go through the `Activity`, the default
//! handler comes from `Telephony.Sms`, and the change request is an
//! `ACTION_CHANGE_DEFAULT` intent. The rationale alert is drawn by an embedded
//! Kotlin helper, loaded from DEX on first use.

use crate::{
    Capability, Grant, Host, PermissionError, PermissionOutcome, PermissionRequest, RequestCode,
};
use jni::objects::{GlobalRef, JClass, JIntArray, JObject, JObjectArray, JString, JValue};
use jni::sys::{jint, jsize};
use jni::{JNIEnv, JavaVM};
use messagekit_dialog::Alert;
use std::sync::{Arc, OnceLock};

/// Embedded DEX bytecode containing the `PermissionHelper` class.
static DEX_BYTES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/classes.dex"));

/// Cached class loader for the embedded DEX.
static CLASS_LOADER: OnceLock<GlobalRef> = OnceLock::new();

const HELPER_CLASS_NAME: &str = "messagekit.permission.PermissionHelper";

/// `Telephony.Sms.Intents.ACTION_CHANGE_DEFAULT`.
const ACTION_CHANGE_DEFAULT: &str = "android.provider.Telephony.ACTION_CHANGE_DEFAULT";
/// `Telephony.Sms.Intents.EXTRA_PACKAGE_NAME`.
const EXTRA_PACKAGE_NAME: &str = "package";

fn platform(what: &str, e: &jni::errors::Error) -> PermissionError {
    PermissionError::Platform(format!("JNI error {what}: {e}"))
}

/// Host bound to one `Activity`.
#[derive(Clone)]
pub struct AndroidHost {
    vm: Arc<JavaVM>,
    activity: GlobalRef,
}

impl std::fmt::Debug for AndroidHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidHost").finish_non_exhaustive()
    }
}

impl AndroidHost {
    /// Bind a host to `activity`.
    ///
    /// The first host created also installs the rationale helper.
    ///
    /// # Errors
    /// Returns an error if the VM, a global reference or the helper cannot
    /// be obtained.
    pub fn new(env: &mut JNIEnv, activity: &JObject) -> Result<Self, PermissionError> {
        init_class_loader(env, activity)?;

        let vm = env.get_java_vm().map_err(|e| platform("get_java_vm", &e))?;
        let activity = env
            .new_global_ref(activity)
            .map_err(|e| platform("new_global_ref", &e))?;

        Ok(Self {
            vm: Arc::new(vm),
            activity,
        })
    }

    /// Run `f` with an attached env and the activity. A pending Java
    /// exception is cleared and reported as [`PermissionError::Platform`].
    fn with_env<T>(
        &self,
        what: &str,
        f: impl FnOnce(&mut JNIEnv, &JObject) -> jni::errors::Result<T>,
    ) -> Result<T, PermissionError> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| platform("attach_current_thread", &e))?;

        f(&mut *env, self.activity.as_obj()).map_err(|e| {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_describe();
                let _ = env.exception_clear();
            }
            platform(what, &e)
        })
    }
}

impl Host for AndroidHost {
    fn check_permission(&self, capability: Capability) -> Grant {
        let result = self.with_env("checkSelfPermission", |env, activity| {
            let name = env.new_string(capability.android_name())?;
            env.call_method(
                activity,
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&name)],
            )?
            .i()
        });

        match result {
            Ok(code) => Grant::from_android(code),
            Err(e) => {
                log::error!("checking {capability} failed: {e}");
                Grant::Denied
            }
        }
    }

    fn request_permissions(
        &self,
        capabilities: &[Capability],
        request_code: RequestCode,
    ) -> Result<(), PermissionError> {
        let names: Vec<&str> = capabilities
            .iter()
            .copied()
            .map(Capability::android_name)
            .collect();

        self.with_env("requestPermissions", |env, activity| {
            let names = string_array(env, &names)?;
            env.call_method(
                activity,
                "requestPermissions",
                "([Ljava/lang/String;I)V",
                &[JValue::Object(&names), JValue::Int(request_code.0)],
            )?;
            Ok(())
        })
    }

    fn package_name(&self) -> Result<String, PermissionError> {
        self.with_env("getPackageName", |env, activity| {
            let name = env
                .call_method(activity, "getPackageName", "()Ljava/lang/String;", &[])?
                .l()?;
            Ok(env.get_string(&JString::from(name))?.into())
        })
    }

    fn default_sms_package(&self) -> Result<Option<String>, PermissionError> {
        self.with_env("getDefaultSmsPackage", |env, activity| {
            let package = env
                .call_static_method(
                    "android/provider/Telephony$Sms",
                    "getDefaultSmsPackage",
                    "(Landroid/content/Context;)Ljava/lang/String;",
                    &[JValue::Object(activity)],
                )?
                .l()?;

            if package.is_null() {
                return Ok(None);
            }
            Ok(Some(env.get_string(&JString::from(package))?.into()))
        })
    }

    fn launch_change_default(&self, package: &str) -> Result<(), PermissionError> {
        self.with_env("startActivity", |env, activity| {
            let action = env.new_string(ACTION_CHANGE_DEFAULT)?;
            let intent = env.new_object(
                "android/content/Intent",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&action)],
            )?;

            let key = env.new_string(EXTRA_PACKAGE_NAME)?;
            let value = env.new_string(package)?;
            env.call_method(
                &intent,
                "putExtra",
                "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&key), JValue::Object(&value)],
            )?;

            env.call_method(
                activity,
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&intent)],
            )?;
            Ok(())
        })
    }

    fn show_rationale(
        &self,
        alert: &Alert,
        retry: PermissionRequest,
    ) -> Result<(), PermissionError> {
        let names = retry.capabilities.android_names();

        self.with_env("showRationale", |env, activity| {
            let helper = helper_class(env)?;
            let title = match &alert.title {
                Some(title) => JObject::from(env.new_string(title)?),
                None => JObject::null(),
            };
            let message = env.new_string(&alert.message)?;
            let button = env.new_string(&alert.button)?;
            let permissions = string_array(env, &names)?;

            env.call_static_method(
                helper,
                "showRationale",
                "(Landroid/app/Activity;Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;[Ljava/lang/String;I)V",
                &[
                    JValue::Object(activity),
                    JValue::Object(&title),
                    JValue::Object(&message),
                    JValue::Object(&button),
                    JValue::Object(&permissions),
                    JValue::Int(retry.request_code.0),
                ],
            )?;
            Ok(())
        })
    }
}

/// Build a Java `String[]`.
fn string_array<'local>(
    env: &mut JNIEnv<'local>,
    items: &[&str],
) -> jni::errors::Result<JObjectArray<'local>> {
    let len = jsize::try_from(items.len())
        .map_err(|_| jni::errors::Error::JniCall(jni::errors::JniError::InvalidArguments))?;
    let array = env.new_object_array(len, "java/lang/String", JObject::null())?;
    for (index, item) in (0..).zip(items) {
        let item = env.new_string(item)?;
        env.set_object_array_element(&array, index, item)?;
    }
    Ok(array)
}

/// Write the embedded DEX to the app cache and keep a class loader for it.
fn init_class_loader(env: &mut JNIEnv, context: &JObject) -> Result<(), PermissionError> {
    if CLASS_LOADER.get().is_some() {
        return Ok(());
    }

    let cache_path = env
        .call_method(context, "getCacheDir", "()Ljava/io/File;", &[])
        .and_then(|v| v.l())
        .and_then(|dir| {
            env.call_method(&dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
                .and_then(|v| v.l())
        })
        .map_err(|e| platform("getCacheDir", &e))?;
    let cache_dir: String = env
        .get_string((&cache_path).into())
        .map_err(|e| platform("get_string", &e))?
        .into();

    let dex_path = format!("{cache_dir}/messagekit_permission.dex");

    // A previous run left a read-only copy behind.
    let _ = std::fs::remove_file(&dex_path);

    log::info!("installing permission helper at {dex_path}");
    std::fs::write(&dex_path, DEX_BYTES)
        .map_err(|e| PermissionError::Platform(format!("write DEX failed: {e}")))?;

    // Android refuses writable DEX files.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&dex_path)
            .map_err(|e| PermissionError::Platform(format!("metadata DEX failed: {e}")))?
            .permissions();
        perms.set_mode(0o444);
        std::fs::set_permissions(&dex_path, perms)
            .map_err(|e| PermissionError::Platform(format!("set_permissions DEX failed: {e}")))?;
    }

    let dex_path = env
        .new_string(&dex_path)
        .map_err(|e| platform("new_string", &e))?;
    let parent_loader = env
        .call_method(context, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .and_then(|v| v.l())
        .map_err(|e| platform("getClassLoader", &e))?;

    let class_loader = env
        .new_object(
            "dalvik/system/DexClassLoader",
            "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;Ljava/lang/ClassLoader;)V",
            &[
                JValue::Object(&dex_path),
                JValue::Object(&cache_path),
                JValue::Object(&JObject::null()),
                JValue::Object(&parent_loader),
            ],
        )
        .map_err(|e| platform("new DexClassLoader", &e))?;

    let global_ref = env
        .new_global_ref(class_loader)
        .map_err(|e| platform("new_global_ref", &e))?;
    let _ = CLASS_LOADER.set(global_ref);
    Ok(())
}

fn helper_class<'local>(env: &mut JNIEnv<'local>) -> jni::errors::Result<JClass<'local>> {
    let class_loader = CLASS_LOADER.get().ok_or(jni::errors::Error::NullPtr(
        "permission helper class loader",
    ))?;

    let name = env.new_string(HELPER_CLASS_NAME)?;
    let class = env
        .call_method(
            class_loader.as_obj(),
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&name)],
        )?
        .l()?;

    Ok(class.into())
}

/// Convert an `onRequestPermissionsResult` payload into an outcome.
///
/// # Errors
/// Returns an error if the Java arrays cannot be read.
pub fn outcome_from_java(
    env: &mut JNIEnv,
    request_code: jint,
    permissions: &JObjectArray,
    grant_results: &JIntArray,
) -> Result<PermissionOutcome, PermissionError> {
    let len = env
        .get_array_length(permissions)
        .map_err(|e| platform("get_array_length", &e))?;

    let mut names = Vec::with_capacity(usize::try_from(len).unwrap_or_default());
    for index in 0..len {
        let element = env
            .get_object_array_element(permissions, index)
            .map_err(|e| platform("get_object_array_element", &e))?;
        let name: String = env
            .get_string(&JString::from(element))
            .map_err(|e| platform("get_string", &e))?
            .into();
        names.push(name);
    }

    let grant_len = env
        .get_array_length(grant_results)
        .map_err(|e| platform("get_array_length", &e))?;
    let mut raw = vec![0; usize::try_from(grant_len).unwrap_or_default()];
    env.get_int_array_region(grant_results, 0, &mut raw)
        .map_err(|e| platform("get_int_array_region", &e))?;

    Ok(PermissionOutcome::new(
        RequestCode(request_code),
        names,
        raw.into_iter().map(Grant::from_android).collect(),
    ))
}
