//! In-page scripts behind element lookups and element operations.
//!
//! Elements found on the page are kept in a registry object on `window`,
//! keyed by the numeric id handed out as [`ElementHandle`]. A navigation
//! discards the registry, so old handles then read as stale.
//!
//! [`ElementHandle`]: buildport_protocols::ElementHandle

use buildport_protocols::{PageError, Selector, SelectorKind};
use serde_json::Value;

const REGISTRY: &str = "(window.__buildportHandles = window.__buildportHandles || \
     { next: 1, map: new Map(), ids: new WeakMap() })";

/// Operation applied to a registered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ElementOp {
    Click,
    Text,
    Displayed,
}

impl ElementOp {
    fn function(&self) -> &'static str {
        match self {
            ElementOp::Click => {
                "(el) => { el.scrollIntoView({ block: 'center', inline: 'center' }); el.click(); return true; }"
            }
            ElementOp::Text => "(el) => (el.innerText ?? el.textContent ?? '').replace(/\\r/g, '')",
            ElementOp::Displayed => {
                "(el) => { if (el.getClientRects().length === 0) return false; \
                 const s = window.getComputedStyle(el); \
                 return s.visibility !== 'hidden' && s.display !== 'none' && s.opacity !== '0'; }"
            }
        }
    }
}

/// Quote a string as a JavaScript literal.
fn js_string(value: &str) -> String {
    // JSON strings are valid JS string literals.
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn lookup(selector: &Selector) -> String {
    let v = js_string(selector.value());
    match selector.kind() {
        SelectorKind::Css | SelectorKind::Tag => {
            format!("Array.from(root.querySelectorAll({v}))")
        }
        SelectorKind::Id => {
            format!("Array.from(root.querySelectorAll('[id=' + JSON.stringify({v}) + ']'))")
        }
        SelectorKind::Class => {
            format!("Array.from(root.querySelectorAll('.' + CSS.escape({v})))")
        }
        SelectorKind::XPath => format!(
            "(() => {{ const r = document.evaluate({v}, root, null, \
             XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; \
             for (let i = 0; i < r.snapshotLength; i++) {{ const n = r.snapshotItem(i); \
             if (n.nodeType === 1) out.push(n); }} return out; }})()"
        ),
    }
}

/// Script that registers every match of `selector` below `scope` and
/// returns `{ ids }`, `{ stale }` or `{ invalid }`.
pub(crate) fn find_script(scope: Option<u64>, selector: &Selector) -> String {
    let scope = scope.map_or_else(|| "null".to_string(), |id| id.to_string());
    format!(
        "(() => {{ const reg = {REGISTRY}; \
         const register = (el) => {{ let id = reg.ids.get(el); \
         if (id === undefined) {{ id = reg.next++; reg.ids.set(el, id); reg.map.set(id, el); }} \
         return id; }}; \
         const scopeId = {scope}; let root = document; \
         if (scopeId !== null) {{ root = reg.map.get(scopeId); \
         if (!root || !root.isConnected) return {{ stale: scopeId }}; }} \
         let found; \
         try {{ found = {lookup}; }} catch (e) {{ return {{ invalid: String(e && e.message || e) }}; }} \
         return {{ ids: found.map(register) }}; }})()",
        lookup = lookup(selector),
    )
}

/// Script that applies `op` to element `id` and returns `{ value }` or `{ stale }`.
pub(crate) fn element_script(id: u64, op: ElementOp) -> String {
    format!(
        "(() => {{ const reg = {REGISTRY}; const el = reg.map.get({id}); \
         if (!el || !el.isConnected) return {{ stale: {id} }}; \
         const op = {function}; return {{ value: op(el) }}; }})()",
        function = op.function(),
    )
}

fn stale(result: &Value) -> Option<u64> {
    result.get("stale").and_then(Value::as_u64)
}

/// Decode the result of [`find_script`].
pub(crate) fn parse_ids(result: &Value, selector: &Selector) -> Result<Vec<u64>, PageError> {
    if let Some(id) = stale(result) {
        return Err(PageError::StaleElement(id));
    }
    if let Some(message) = result.get("invalid").and_then(Value::as_str) {
        return Err(PageError::InvalidSelector(format!("{}: {}", selector, message)));
    }

    let ids = result
        .get("ids")
        .and_then(Value::as_array)
        .ok_or_else(|| PageError::InvalidResponse(format!("lookup returned {}", result)))?;

    ids.iter()
        .map(|id| {
            id.as_u64()
                .ok_or_else(|| PageError::InvalidResponse(format!("bad element id {}", id)))
        })
        .collect()
}

/// Decode the result of [`element_script`].
pub(crate) fn parse_value(result: Value) -> Result<Value, PageError> {
    if let Some(id) = stale(&result) {
        return Err(PageError::StaleElement(id));
    }
    match result {
        Value::Object(mut map) => Ok(map.remove("value").unwrap_or(Value::Null)),
        other => Err(PageError::InvalidResponse(format!("element call returned {}", other))),
    }
}
