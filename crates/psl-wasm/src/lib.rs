//! WebAssembly bindings for the Public Suffix List matcher
//!
//! One list per module instance, held in a thread-local context (wasm is
//! single threaded). The exported names follow the JavaScript API the
//! bindings replace.

use std::cell::RefCell;

use psl_compiler::{compile_rules, compile_rules_with, CompileStats};
use psl_core::{PublicSuffixList, Snapshot};
use wasm_bindgen::prelude::*;

thread_local! {
    static LIST: RefCell<PublicSuffixList> = RefCell::new(PublicSuffixList::new());
}

fn with_list<R>(f: impl FnOnce(&mut PublicSuffixList) -> R) -> R {
    LIST.with(|list| f(&mut list.borrow_mut()))
}

/// Compile a rule list, replacing the current one.
///
/// `to_ascii` is called for rules holding anything besides `[a-z0-9.-]` and
/// must return the ASCII form of the rule (or the rule unchanged). A
/// non-string return value skips the rule.
#[wasm_bindgen]
pub fn compile(text: &str, to_ascii: Option<js_sys::Function>) -> JsValue {
    // The callback runs before the list is borrowed, so it may call back in.
    let (trie, stats) = match to_ascii {
        Some(f) => compile_rules_with(text, |rule| {
            f.call1(&JsValue::NULL, &JsValue::from_str(rule))
                .ok()
                .and_then(|v| v.as_string())
        }),
        None => compile_rules(text),
    };
    with_list(|list| list.install(trie));
    stats_object(&stats)
}

fn stats_object(stats: &CompileStats) -> JsValue {
    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"rules".into(), &JsValue::from(stats.rules as u32));
    let _ = js_sys::Reflect::set(&result, &"skipped".into(), &JsValue::from(stats.skipped as u32));
    let _ = js_sys::Reflect::set(&result, &"nodes".into(), &JsValue::from(stats.nodes as u32));
    let _ = js_sys::Reflect::set(&result, &"poolBytes".into(), &JsValue::from(stats.pool_bytes as u32));
    let _ = js_sys::Reflect::set(&result, &"bufferWords".into(), &JsValue::from(stats.buffer_words as u32));
    result.into()
}

#[wasm_bindgen(js_name = isCompiled)]
pub fn is_compiled() -> bool {
    with_list(|list| list.is_compiled())
}

/// Public suffix of an ASCII hostname, `""` when there is none.
#[wasm_bindgen(js_name = publicSuffix)]
pub fn public_suffix(hostname: &str) -> String {
    with_list(|list| list.public_suffix(hostname))
}

/// Registrable domain of an ASCII hostname, `""` when there is none.
#[wasm_bindgen(js_name = registrableDomain)]
pub fn registrable_domain(hostname: &str) -> String {
    with_list(|list| list.registrable_domain(hostname))
}

/// Serialize the compiled list to a JSON snapshot.
#[wasm_bindgen(js_name = toSelfie)]
pub fn to_selfie() -> Result<String, JsValue> {
    with_list(|list| list.to_snapshot())
        .to_json()
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize snapshot: {}", e)))
}

/// Restore a list from a JSON snapshot. Returns `false` and keeps the
/// current list when the snapshot is rejected.
#[wasm_bindgen(js_name = fromSelfie)]
pub fn from_selfie(json: &str) -> bool {
    match Snapshot::from_json(json) {
        Ok(snapshot) => with_list(|list| list.restore(&snapshot)),
        Err(e) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Rejected snapshot: {}", e)));
            false
        }
    }
}
