mod state;
mod view_model;

pub use state::DepartmentListState;
pub use view_model::DepartmentListViewModel;

use crate::domain::a001_department::api::HttpDepartmentApi;
use crate::domain::a001_department::ui::details::DepartmentDetails;
use crate::domain::a001_department::ui::import_wizard::ImportWizard;
use crate::shared::download::save_file;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use crate::shared::modal::Modal;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toasts;
use contracts::domain::a001_department::aggregate::Department;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const TABLE_ID: &str = "a001-department-table";

#[component]
pub fn DepartmentList() -> impl IntoView {
    let toasts = use_toasts();
    let vm = DepartmentListViewModel::new(HttpDepartmentApi, toasts);
    let state = vm.state;

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            spawn_local(async move { vm.load().await });
        }
    });

    let search_signal = RwSignal::new(String::new());
    Effect::new(move |_| {
        let query = search_signal.get();
        vm.set_search(query);
    });

    let refresh = move || spawn_local(async move { vm.load().await });

    let export = move || {
        spawn_local(async move {
            let today = chrono::Local::now().date_naive();
            if let Some(file) = vm.export_spreadsheet(today).await {
                if let Err(e) = save_file(&file) {
                    log::error!("Не удалось сохранить {}: {e}", file.file_name);
                    vm.toasts.error("Не удалось сохранить файл");
                }
            }
        });
    };

    let on_submit = Callback::new(move |_| {
        spawn_local(async move {
            vm.submit().await;
        });
    });
    let on_close_details = Callback::new(move |_| vm.close_details());

    let on_imported = Callback::new(move |_| {
        spawn_local(async move { vm.on_import_committed().await });
    });
    let on_close_import = Callback::new(move |_| vm.close_import());

    let sort_header = move |field: &'static str, label: &'static str| {
        view! {
            <div
                class="table__sortable-header"
                style="cursor:pointer;"
                on:click=move |_| vm.toggle_sort(field)
            >
                {label}
                <span class=move || state.with(|s| get_sort_class(&s.sort_field, field))>
                    {move || {
                        state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))
                    }}
                </span>
            </div>
        }
    };

    let render_row = move |department: Department| {
        let edit_id = department.id.clone();
        let delete_id = department.id.clone();
        let dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
        view! {
            <TableRow>
                <TableCell>
                    <TableCellLayout truncate=true>
                        <span style="font-weight: 500;">{department.name.clone()}</span>
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>{dash(department.code.clone())}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout truncate=true>{dash(department.location.clone())}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout truncate=true>
                        {dash(department.manager_name.clone())}
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>{dash(department.phone.clone())}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>
                        <span class="badge badge--neutral">
                            {icon("users")}
                            {format!(" {}", department.employee_count)}
                        </span>
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>
                        <button
                            class="button button--icon"
                            title="Редактировать"
                            on:click=move |_| vm.open_edit(&edit_id)
                        >
                            {icon("edit")}
                        </button>
                        <button
                            class="button button--icon button--danger"
                            title="Удалить"
                            on:click=move |_| vm.request_delete(&delete_id)
                        >
                            {icon("delete")}
                        </button>
                    </TableCellLayout>
                </TableCell>
            </TableRow>
        }
    };

    view! {
        <PageFrame page_id="a001_department--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("building")}
                    <h1 class="page__title">{Department::list_name()}</h1>
                    <Badge>{move || state.with(|s| s.items.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.open_create()>
                        {icon("plus")}
                        " Новый отдел"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.open_import()
                    >
                        {icon("upload")}
                        " Импорт"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| export()
                        disabled=Signal::derive(move || vm.exporting.get())
                    >
                        {icon("download")}
                        {move || if vm.exporting.get() { " Выгрузка..." } else { " Экспорт" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| refresh()
                        disabled=Signal::derive(move || state.with(|s| s.loading))
                    >
                        {icon("refresh")}
                        {move || if state.with(|s| s.loading) { " Загрузка..." } else { " Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div style="flex: 1; max-width: 320px;">
                            <Input
                                value=search_signal
                                placeholder="Название, код, расположение, руководитель..."
                            />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| search_signal.set(String::new())
                        >
                            "Сбросить"
                        </Button>
                    </Flex>
                </div>

                <div class="table-wrapper">
                    <Table attr:id=TABLE_ID attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=180.0>
                                    {sort_header("name", "Название")}
                                </TableHeaderCell>
                                <TableHeaderCell min_width=80.0>
                                    {sort_header("code", "Код")}
                                </TableHeaderCell>
                                <TableHeaderCell min_width=140.0>
                                    {sort_header("location", "Расположение")}
                                </TableHeaderCell>
                                <TableHeaderCell min_width=160.0>
                                    {sort_header("manager_name", "Руководитель")}
                                </TableHeaderCell>
                                <TableHeaderCell min_width=120.0>
                                    {sort_header("phone", "Телефон")}
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>
                                    {sort_header("employee_count", "Сотрудники")}
                                </TableHeaderCell>
                                <TableHeaderCell min_width=80.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || vm.visible_items()
                                key=|d| d.id.clone()
                                children=render_row
                            />
                        </TableBody>
                    </Table>

                    {move || {
                        let (loaded, empty) = state.with(|s| (s.is_loaded, s.items.is_empty()));
                        (loaded && empty)
                            .then(|| view! { <div class="table__empty">"Отделы ещё не созданы"</div> })
                    }}
                </div>
            </div>

            <Show when=move || vm.show_details.get()>
                <Modal
                    title=Signal::derive(move || {
                        if vm.details.is_edit_mode() {
                            "Редактирование отдела".to_string()
                        } else {
                            "Новый отдел".to_string()
                        }
                    })
                    on_close=on_close_details
                    can_close=Signal::derive(move || !vm.details.saving.get())
                    modal_class="department-details-modal"
                >
                    <DepartmentDetails
                        vm=vm.details
                        on_submit=on_submit
                        on_cancel=on_close_details
                    />
                </Modal>
            </Show>

            <Show when=move || vm.pending_delete.with(Option::is_some)>
                <Modal
                    title="Удаление отдела".to_string()
                    on_close=Callback::new(move |_| vm.cancel_delete())
                    can_close=Signal::derive(move || !vm.deleting.get())
                >
                    <p class="modal__text">
                        {move || {
                            vm.pending_delete
                                .with(|d| d.as_ref().map(|d| d.name.clone()))
                                .map(|name| format!("Удалить отдел «{name}»? Действие нельзя отменить."))
                        }}
                    </p>
                    <div class="details-actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| spawn_local(async move { vm.confirm_delete().await })
                            disabled=Signal::derive(move || vm.deleting.get())
                        >
                            {icon("delete")}
                            {move || if vm.deleting.get() { " Удаление..." } else { " Удалить" }}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.cancel_delete()
                            disabled=Signal::derive(move || vm.deleting.get())
                        >
                            "Отмена"
                        </Button>
                    </div>
                </Modal>
            </Show>

            <Show when=move || vm.show_import.get()>
                <ImportWizard on_imported=on_imported on_close=on_close_import />
            </Show>
        </PageFrame>
    }
}
