use super::state::{WizardStage, WizardStep};
use super::view_model::ImportWizardViewModel;
use crate::domain::a001_department::api::HttpDepartmentApi;
use crate::domain::a001_department::import_file::{read_browser_file, ImportFile};
use crate::shared::download::save_file;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::toast::use_toasts;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_departments::{
    ImportDepartments, ImportExecuteResponse, ImportFileKind, ImportPreviewResponse, ImportRow,
    InvalidImportRow,
};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use web_sys::HtmlInputElement;

type Vm = ImportWizardViewModel<HttpDepartmentApi>;

#[component]
pub fn ImportWizard(
    /// Вызывается после успешной загрузки (список перечитывается)
    on_imported: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm: Vm = ImportWizardViewModel::new(HttpDepartmentApi, use_toasts());

    let close = Callback::new(move |_| vm.close(move || on_close.run(())));

    view! {
        <Modal
            title=ImportDepartments::display_name().to_string()
            on_close=close
            can_close=Signal::derive(move || !vm.busy.get())
            modal_class="import-wizard-modal"
        >
            <WizardSteps vm=vm />
            <div class="import-wizard__body" data-usecase=ImportDepartments::full_name()>
                {move || match vm.stage.get() {
                    WizardStage::Upload { file } => {
                        view! { <UploadStep vm=vm file=file /> }.into_any()
                    }
                    WizardStage::Preview { preview, .. } => {
                        view! { <PreviewStep preview=preview /> }.into_any()
                    }
                    WizardStage::Result { result } => {
                        view! { <ResultStep result=result /> }.into_any()
                    }
                }}
            </div>
            <WizardActions vm=vm on_imported=on_imported close=close />
        </Modal>
    }
}

#[component]
fn WizardSteps(vm: Vm) -> impl IntoView {
    let steps = WizardStep::ALL
        .into_iter()
        .map(|step| {
            let class = move || {
                let current = vm.step().number();
                if step.number() == current {
                    "wizard-step wizard-step--active"
                } else if step.number() < current {
                    "wizard-step wizard-step--done"
                } else {
                    "wizard-step"
                }
            };
            view! {
                <div class=class>
                    <span class="wizard-step__number">{step.number()}</span>
                    <span class="wizard-step__title">{step.title()}</span>
                </div>
            }
        })
        .collect_view();

    view! { <div class="wizard-steps">{steps}</div> }
}

#[component]
fn UploadStep(vm: Vm, file: Option<ImportFile>) -> impl IntoView {
    // файл читается только после проверки расширения; из нескольких
    // одновременных чтений в слот попадает только последний выбор
    let take_file = move |file: web_sys::File| {
        let Some(ticket) = vm.accept_file_name(&file.name()) else {
            return;
        };
        spawn_local(async move {
            match read_browser_file(file).await {
                Ok(file) => {
                    if let Err(e) = vm.select_file(ticket, file) {
                        log::debug!("Файл не принят: {e}");
                    }
                }
                Err(e) => {
                    log::error!("{e}");
                    vm.toasts.error(e);
                }
            }
        });
    };

    let on_input_change = move |ev: ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            take_file(file);
        }
        input.set_value("");
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        vm.drag_over.set(false);
        if vm.busy.get_untracked() {
            return;
        }
        let dropped = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if let Some(file) = dropped {
            take_file(file);
        }
    };

    let download_template = move |_: ev::MouseEvent| {
        spawn_local(async move {
            if let Some(template) = vm.download_template().await {
                if let Err(e) = save_file(&template) {
                    log::error!("Не удалось сохранить шаблон: {e}");
                    vm.toasts.error("Не удалось сохранить файл");
                }
            }
        });
    };

    let selected = file.map(|f| {
        view! {
            <div class="import-wizard__file">
                {icon("file")}
                <span class="import-wizard__file-name">{f.name.clone()}</span>
                <Badge>{f.size_label()}</Badge>
            </div>
        }
    });

    view! {
        <div
            class="import-wizard__dropzone"
            class:import-wizard__dropzone--over=move || vm.drag_over.get()
            class:import-wizard__dropzone--disabled=move || vm.busy.get()
            on:dragover=move |ev: ev::DragEvent| {
                ev.prevent_default();
                if !vm.busy.get_untracked() {
                    vm.drag_over.set(true);
                }
            }
            on:dragleave=move |_| vm.drag_over.set(false)
            on:drop=on_drop
        >
            {icon("upload")}
            <p>"Перетащите файл сюда или выберите его на диске"</p>
            <label class="button button--secondary">
                "Выбрать файл"
                <input
                    type="file"
                    style="display: none;"
                    accept=ImportFileKind::accept_attr()
                    on:change=on_input_change
                    disabled=move || vm.busy.get()
                />
            </label>
            <p class="import-wizard__hint">{ImportDepartments::description()}</p>
        </div>

        {selected}

        <div class="import-wizard__template">
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=download_template
                disabled=Signal::derive(move || vm.busy.get())
            >
                {icon("download")}
                " Скачать шаблон"
            </Button>
        </div>
    }
}

#[component]
fn PreviewStep(preview: ImportPreviewResponse) -> impl IntoView {
    let summary = preview.summary;

    view! {
        <div class="import-wizard__summary">
            <span class="badge badge--neutral">{format!("Всего строк: {}", summary.total)}</span>
            <span class="badge badge--success">{format!("Новых: {}", summary.valid)}</span>
            <span class="badge badge--warning">{format!("Обновлений: {}", summary.updates)}</span>
            <span class="badge badge--error">{format!("С ошибками: {}", summary.invalid)}</span>
        </div>

        {(!summary.has_importable_rows()).then(|| view! {
            <div class="alert alert--error">
                {icon("alert")}
                " В файле нет строк, которые можно загрузить"
            </div>
        })}

        <PreviewRows title="Будут добавлены" rows=preview.valid />
        <PreviewRows title="Будут обновлены (совпал код)" rows=preview.updates />
        <InvalidRows rows=preview.invalid />
    }
}

#[component]
fn PreviewRows(title: &'static str, rows: Vec<ImportRow>) -> impl IntoView {
    if rows.is_empty() {
        return ().into_any();
    }
    let dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    view! {
        <h3 class="import-wizard__section-title">{format!("{title}: {}", rows.len())}</h3>
        <table class="table__data table--striped">
            <thead class="table__head">
                <tr>
                    <th class="table__header-cell">"Строка"</th>
                    <th class="table__header-cell">"Код"</th>
                    <th class="table__header-cell">"Название"</th>
                    <th class="table__header-cell">"Расположение"</th>
                    <th class="table__header-cell">"Руководитель"</th>
                    <th class="table__header-cell">"Телефон"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        view! {
                            <tr class="table__row">
                                <td class="table__cell">{row.row.map(|n| n.to_string()).unwrap_or_default()}</td>
                                <td class="table__cell">{dash(row.code)}</td>
                                <td class="table__cell">{row.name}</td>
                                <td class="table__cell">{dash(row.location)}</td>
                                <td class="table__cell">{dash(row.manager_name)}</td>
                                <td class="table__cell">{dash(row.phone)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

#[component]
fn InvalidRows(rows: Vec<InvalidImportRow>) -> impl IntoView {
    if rows.is_empty() {
        return ().into_any();
    }

    view! {
        <h3 class="import-wizard__section-title">{format!("Ошибки: {}", rows.len())}</h3>
        <table class="table__data table--striped">
            <thead class="table__head">
                <tr>
                    <th class="table__header-cell">"Строка"</th>
                    <th class="table__header-cell">"Название"</th>
                    <th class="table__header-cell">"Ошибки"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        view! {
                            <tr class="table__row table__row--error">
                                <td class="table__cell">{row.row}</td>
                                <td class="table__cell">{row.name}</td>
                                <td class="table__cell">{row.errors.join("; ")}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

#[component]
fn ResultStep(result: ImportExecuteResponse) -> impl IntoView {
    let results = result.results;

    view! {
        <div class="import-wizard__result">
            {icon("check")}
            <p class="import-wizard__result-message">{result.message}</p>
            <ul class="import-wizard__result-list">
                <li>{format!("Добавлено: {}", results.inserted)}</li>
                <li>{format!("Обновлено: {}", results.updated)}</li>
                <li>{format!("Пропущено: {}", results.skipped)}</li>
            </ul>
        </div>
    }
}

#[component]
fn WizardActions(vm: Vm, on_imported: Callback<()>, close: Callback<()>) -> impl IntoView {
    let busy = Signal::derive(move || vm.busy.get());

    move || match vm.step() {
        WizardStep::Upload => view! {
            <div class="details-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(()) disabled=busy>
                    "Отмена"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| spawn_local(async move { vm.preview().await })
                    disabled=Signal::derive(move || {
                        vm.busy.get() || vm.stage.with(|s| s.file().is_none())
                    })
                >
                    {move || if vm.busy.get() { "Проверка..." } else { "Далее" }}
                </Button>
            </div>
        }
        .into_any(),
        WizardStep::Preview => view! {
            <div class="details-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.previous() disabled=busy>
                    {icon("arrow-left")}
                    " Назад"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| {
                        spawn_local(async move { vm.execute(move || on_imported.run(())).await })
                    }
                    disabled=Signal::derive(move || !vm.can_commit())
                >
                    {icon("upload")}
                    {move || if vm.busy.get() { " Импорт..." } else { " Импортировать" }}
                </Button>
            </div>
        }
        .into_any(),
        WizardStep::Result => view! {
            <div class="details-actions">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| close.run(())>
                    "Закрыть"
                </Button>
            </div>
        }
        .into_any(),
    }
}
