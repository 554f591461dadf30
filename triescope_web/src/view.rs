// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use js_sys::{Function, Promise};
use triescope::{BatchStep, DEFAULT_ANIMATION_DELAY, ThemeSource, TrieDiagram, WordBatch};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CssStyleDeclaration, Element, Window};

use crate::options::{StatsObject, ViewOptions};

/// Theme variables read from the container's computed style.
struct ComputedTheme(Option<CssStyleDeclaration>);

impl ThemeSource for ComputedTheme {
    fn variable(&self, name: &str) -> Option<String> {
        self.0.as_ref()?.get_property_value(name).ok()
    }
}

struct Inner {
    diagram: TrieDiagram,
    container: Element,
    window: Window,
    frame_pending: bool,
}

impl Inner {
    fn clock(&self) -> Duration {
        let ms = self.window.performance().map_or(0.0, |p| p.now());
        Duration::try_from_secs_f64(ms / 1000.0).unwrap_or_default()
    }

    fn sync_clock(&mut self) {
        let now = self.clock();
        self.diagram.tick(now);
    }

    fn draw(&self) {
        self.container.set_inner_html(&self.diagram.to_svg());
    }
}

/// Requests a frame unless one is already pending.
///
/// Each frame advances the clock, redraws, and requests the next frame while
/// anything is still moving.
fn schedule_frame(inner: &Rc<RefCell<Inner>>) {
    let window = {
        let mut state = inner.borrow_mut();
        if state.frame_pending {
            return;
        }
        state.frame_pending = true;
        state.window.clone()
    };
    let next = Rc::clone(inner);
    let callback = Closure::once_into_js(move || {
        let animating = {
            let mut state = next.borrow_mut();
            state.frame_pending = false;
            state.sync_clock();
            state.draw();
            state.diagram.is_animating()
        };
        if animating {
            schedule_frame(&next);
        }
    });
    if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
        tracing::warn!(?err, "requestAnimationFrame failed");
        inner.borrow_mut().frame_pending = false;
    }
}

async fn sleep(window: &Window, delay: Duration) -> Result<(), JsValue> {
    let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
        {
            let _ = reject.call1(&JsValue::UNDEFINED, &err);
        }
    });
    JsFuture::from(promise).await.map(drop)
}

/// A trie diagram drawn into a container element.
#[wasm_bindgen]
pub struct TrieView {
    inner: Rc<RefCell<Inner>>,
}

impl core::fmt::Debug for TrieView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrieView").finish_non_exhaustive()
    }
}

impl TrieView {
    /// Runs `f` against the diagram at the current time, then redraws.
    fn mutate<R>(&self, f: impl FnOnce(&mut TrieDiagram) -> R) -> R {
        let out = {
            let mut state = self.inner.borrow_mut();
            state.sync_clock();
            f(&mut state.diagram)
        };
        schedule_frame(&self.inner);
        out
    }
}

#[wasm_bindgen]
impl TrieView {
    /// Creates a view inside `container`.
    ///
    /// `options` may be `undefined`. Theme colors are read from the
    /// container's computed style once, here.
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, options: JsValue) -> Result<TrieView, JsValue> {
        let options: ViewOptions = if options.is_undefined() || options.is_null() {
            ViewOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        let config = options
            .to_config()
            .map_err(|err| JsError::new(&err.to_string()))?;
        let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
        let theme = ComputedTheme(window.get_computed_style(&container)?);
        let inner = Inner {
            diagram: TrieDiagram::with_theme(config, &theme),
            container,
            window,
            frame_pending: false,
        };
        inner.draw();
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    /// Inserts one word. Returns `false` for empty or duplicate words.
    #[wasm_bindgen(js_name = addWord)]
    pub fn add_word(&self, word: &str) -> bool {
        self.mutate(|d| d.add_word(word))
    }

    /// Inserts every word with a single render pass.
    #[wasm_bindgen(js_name = addWords)]
    pub fn add_words(&self, words: Vec<String>) -> usize {
        self.mutate(|d| d.add_words(&words))
    }

    /// Inserts words one at a time, `delayMs` apart (500 by default).
    ///
    /// The returned promise resolves to the number of accepted words. Other
    /// calls on this view may run during the pauses.
    #[wasm_bindgen(js_name = addWordsAnimated)]
    pub fn add_words_animated(&self, words: Vec<String>, delay_ms: Option<u32>) -> Promise {
        let inner = Rc::clone(&self.inner);
        let delay = delay_ms.map_or(DEFAULT_ANIMATION_DELAY, |ms| {
            Duration::from_millis(u64::from(ms))
        });
        wasm_bindgen_futures::future_to_promise(async move {
            let mut batch = WordBatch::new(words);
            loop {
                let step = {
                    let mut state = inner.borrow_mut();
                    let now = state.clock();
                    batch.step(&mut state.diagram, now)
                };
                schedule_frame(&inner);
                if step == BatchStep::Done {
                    break;
                }
                let window = inner.borrow().window.clone();
                sleep(&window, delay).await?;
            }
            let accepted = u32::try_from(batch.accepted()).unwrap_or(u32::MAX);
            Ok(JsValue::from(accepted))
        })
    }

    /// Removes every word; the nodes fade out.
    pub fn clear(&self) {
        self.mutate(TrieDiagram::clear);
    }

    /// Emphasizes the root and every node along `prefix`.
    #[wasm_bindgen(js_name = highlightPath)]
    pub fn highlight_path(&self, prefix: &str) {
        self.mutate(|d| d.highlight_path(prefix));
    }

    /// Removes all emphasis.
    #[wasm_bindgen(js_name = clearHighlights)]
    pub fn clear_highlights(&self) {
        self.mutate(TrieDiagram::clear_highlights);
    }

    /// The accepted words in insertion order.
    pub fn words(&self) -> Vec<String> {
        self.inner.borrow().diagram.words()
    }

    /// `{ words, nodes }`.
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        let stats = StatsObject::from(self.inner.borrow().diagram.stats());
        Ok(serde_wasm_bindgen::to_value(&stats)?)
    }
}
