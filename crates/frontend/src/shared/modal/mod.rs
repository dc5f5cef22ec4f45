use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Модальное окно: оверлей + заголовок + тело.
///
/// Закрывается по Escape, клику по оверлею и крестику, если это разрешено
/// `can_close` (например, пока идёт запрос к серверу, закрывать нельзя).
#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: Signal<String>,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Blocks every close path while false
    #[prop(optional, into)]
    can_close: Option<Signal<bool>>,
    /// Extra class for the modal surface (`div.modal`)
    #[prop(optional)]
    modal_class: Option<&'static str>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    let can_close = can_close.unwrap_or_else(|| Signal::derive(|| true));

    let request_close = move || {
        if can_close.get_untracked() {
            on_close.run(());
        }
    };

    let esc_handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            request_close();
        }
    });
    on_cleanup(move || esc_handle.remove());

    let surface_class = match modal_class {
        Some(extra) => format!("modal {extra}"),
        None => "modal".to_string(),
    };

    view! {
        <div class="modal-overlay" on:click=move |_| request_close()>
            <div class=surface_class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <div class="modal-header-actions">
                        <button
                            class="button button--icon modal__close"
                            on:click=move |_| request_close()
                            disabled=move || !can_close.get()
                        >
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
