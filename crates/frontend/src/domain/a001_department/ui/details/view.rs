use super::view_model::{DepartmentDetailsViewModel, DepartmentField};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn DepartmentDetails(
    vm: DepartmentDetailsViewModel,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let fields = DepartmentField::ALL
        .into_iter()
        .map(|field| {
            view! {
                <div class="form-group">
                    <label for=field.input_id()>{field.label()}</label>
                    <input
                        type="text"
                        id=field.input_id()
                        prop:value=move || vm.field_value(field)
                        on:input=move |ev| vm.set_field(field, event_target_value(&ev))
                        placeholder=field.placeholder()
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="details-container department-details">
            {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <form
                class="details-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit.run(());
                }
            >
                {fields}
            </form>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_submit.run(())
                    disabled=Signal::derive(move || vm.saving.get() || !vm.is_form_valid())
                >
                    {icon("save")}
                    {move || {
                        if vm.saving.get() {
                            " Сохранение..."
                        } else if vm.is_edit_mode() {
                            " Сохранить"
                        } else {
                            " Создать"
                        }
                    }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_cancel.run(())
                    disabled=Signal::derive(move || vm.saving.get())
                >
                    "Отмена"
                </Button>
            </div>
        </div>
    }
}
