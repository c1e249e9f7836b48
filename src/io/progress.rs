use std::sync::{Mutex, OnceLock};

/// Stages of a restyle call, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestyleProgress {
    Encode { bytes: usize },
    Upload,
    Decode { bytes: usize },
    Finished { frames: usize },
}

type ProgressCb = Box<dyn Fn(RestyleProgress) + Send + 'static>;

static RESTYLE_PROGRESS_CB: OnceLock<Mutex<Option<ProgressCb>>> = OnceLock::new();

pub fn set_restyle_progress_callback(cb: impl Fn(RestyleProgress) + Send + 'static) {
    let slot = RESTYLE_PROGRESS_CB.get_or_init(|| Mutex::new(None));
    if let Ok(mut g) = slot.lock() {
        *g = Some(Box::new(cb));
    }
}

pub fn emit_restyle_progress(p: RestyleProgress) {
    if let Some(m) = RESTYLE_PROGRESS_CB.get() {
        if let Ok(g) = m.lock() {
            if let Some(cb) = &*g {
                cb(p);
            }
        }
    }
}
