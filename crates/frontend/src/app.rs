use crate::domain::a001_department::ui::list::DepartmentList;
use crate::shared::toast::{ToastHost, ToastService};
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Notifications are shared by every screen through context.
    provide_context(ToastService::new());

    view! {
        <ConfigProvider>
            <main class="app">
                <DepartmentList />
            </main>
            <ToastHost />
        </ConfigProvider>
    }
}
