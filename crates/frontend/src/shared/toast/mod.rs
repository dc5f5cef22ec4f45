//! Всплывающие уведомления (toast)
//!
//! `ToastService` кладётся в контекст в `App` и доступен через `use_toasts()`.
//! `ToastHost` рендерит активные уведомления; всё, кроме `Loading`,
//! закрывается само через `AUTO_DISMISS_MS`.

use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use uuid::Uuid;

const AUTO_DISMISS_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Loading,
    Success,
    Error,
}

impl ToastKind {
    fn css_modifier(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Loading => "loading",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastEntry {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Сервис уведомлений
#[derive(Clone, Copy)]
pub struct ToastService {
    entries: RwSignal<Vec<ToastEntry>>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            entries: RwSignal::new(Vec::new()),
        }
    }

    fn push(&self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        let message = message.into();
        self.entries.update(|list| list.push(ToastEntry { id, kind, message }));
        id
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Error, message)
    }

    /// Уведомление «в процессе», висит до `dismiss`/`resolve`
    pub fn loading(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Loading, message)
    }

    pub fn dismiss(&self, id: Uuid) {
        self.entries.update(|list| list.retain(|t| t.id != id));
    }

    /// Заменить уведомление `id` (обычно `Loading`) итоговым
    pub fn resolve(&self, id: Uuid, kind: ToastKind, message: impl Into<String>) -> Uuid {
        self.dismiss(id);
        self.push(kind, message)
    }

    /// Снимок текущих уведомлений (без подписки)
    pub fn entries(&self) -> Vec<ToastEntry> {
        self.entries.get_untracked()
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-host">
            <For
                each=move || toasts.entries.get()
                key=|t| t.id
                children=move |toast| view! { <ToastItem toast=toast /> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: ToastEntry) -> impl IntoView {
    let toasts = use_toasts();
    let id = toast.id;

    if toast.kind != ToastKind::Loading {
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            toasts.dismiss(id);
        });
    }

    let class = format!("toast toast--{}", toast.kind.css_modifier());

    view! {
        <div class=class role="status">
            <span class="toast__message">{toast.message}</span>
            <button class="button button--icon toast__close" on:click=move |_| toasts.dismiss(id)>
                {icon("x")}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let toasts = ToastService::new();
        let a = toasts.success("Сохранено");
        let b = toasts.error("Ошибка");
        assert_eq!(toasts.entries().len(), 2);

        toasts.dismiss(a);
        let left = toasts.entries();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, b);
        assert_eq!(left[0].kind, ToastKind::Error);
    }

    #[test]
    fn test_resolve_replaces_loading() {
        let toasts = ToastService::new();
        let loading = toasts.loading("Экспорт...");
        toasts.resolve(loading, ToastKind::Success, "Готово");

        let entries = toasts.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, ToastKind::Success);
        assert_eq!(entries[0].message, "Готово");
    }

    #[test]
    fn test_dismiss_unknown_is_noop() {
        let toasts = ToastService::new();
        toasts.info("a");
        toasts.dismiss(Uuid::new_v4());
        assert_eq!(toasts.entries().len(), 1);
    }
}
