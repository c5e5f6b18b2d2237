//! Inspection probes
//!
//! Fixed expressions the panel evaluates in the inspected page. Engines
//! that cannot run scripts may recognize these and answer them natively.

/// Elements looked at by [`ELEMENTS`]
pub const ELEMENTS_SCANNED: usize = 50;

/// Elements reported by [`ELEMENTS`]
pub const ELEMENTS_SHOWN: usize = 20;

/// One line per element: `tag#id.class1.class2`
pub const ELEMENTS: &str = r#"(() => {
  const all = document.querySelectorAll('*');
  const lines = [];
  for (let i = 0; i < Math.min(all.length, 50); i++) {
    const el = all[i];
    let line = el.tagName.toLowerCase();
    if (el.id) line += '#' + el.id;
    if (el.classList.length) line += '.' + Array.from(el.classList).join('.');
    lines.push(line);
  }
  return lines.slice(0, 20).join('\n');
})()"#;

/// JSON text of the page's local storage
pub const LOCAL_STORAGE: &str = "JSON.stringify(localStorage)";

/// One cookie per line
pub const COOKIES: &str = r#"document.cookie.split(';').map(c => c.trim()).filter(c => c).join('\n')"#;
