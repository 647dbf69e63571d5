use leptos::*;

pub fn page_count(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX).max(1)
}

#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] page_size: Signal<u32>,
    #[prop(into)] total: Signal<u64>,
    on_change: Callback<u32>,
) -> impl IntoView {
    let pages = move || page_count(total.get(), page_size.get());
    view! {
        <div class="mt-4 flex justify-between items-center text-sm">
            <button
                type="button"
                class="px-4 py-2 border border-border rounded disabled:opacity-50"
                disabled=move || page.get() <= 1
                on:click=move |_| on_change.call(page.get_untracked().saturating_sub(1).max(1))
            >
                "上一页"
            </button>
            <div class="text-fg-muted space-x-2">
                <span>{move || format!("第 {} 页，共 {} 页", page.get(), pages())}</span>
                <span>{move || format!("共 {} 条", total.get())}</span>
            </div>
            <button
                type="button"
                class="px-4 py-2 border border-border rounded disabled:opacity-50"
                disabled=move || page.get() >= pages()
                on:click=move |_| on_change.call(page.get_untracked() + 1)
            >
                "下一页"
            </button>
        </div>
    }
}
