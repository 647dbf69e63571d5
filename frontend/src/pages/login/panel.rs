use leptos::{ev::SubmitEvent, *};

use super::view_model::{use_login_view_model, LoginViewModel};
use crate::components::error::InlineErrorMessage;

const INPUT_CLASS: &str = "appearance-none relative block w-full px-3 py-2 border border-form-control-border bg-form-control-bg text-fg focus:outline-none focus:z-10 sm:text-sm";

#[component]
pub fn LoginPage() -> impl IntoView {
    let vm = use_login_view_model();
    view! { <LoginPanel vm=vm /> }
}

#[component]
fn LoginPanel(vm: LoginViewModel) -> impl IntoView {
    let pending = vm.login_action.pending();
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">"MiDo"</h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">"个人收款管理后台"</p>
                </div>
                <form class="mt-8 space-y-6" on:submit=handle_submit>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="account" class="sr-only">"账号"</label>
                            <input
                                id="account"
                                name="account"
                                type="text"
                                autocomplete="username"
                                class=format!("{} rounded-t-md", INPUT_CLASS)
                                placeholder="账号"
                                prop:value=move || vm.account.get()
                                on:input=move |ev| vm.account.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">"密码"</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                autocomplete="current-password"
                                class=format!("{} rounded-b-md", INPUT_CLASS)
                                placeholder="密码"
                                prop:value=move || vm.password.get()
                                on:input=move |ev| vm.password.set(event_target_value(&ev))
                            />
                        </div>
                    </div>

                    <InlineErrorMessage error=vm.error />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="group relative w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md bg-action-primary-bg hover:bg-action-primary-bg-hover text-action-primary-text disabled:opacity-50"
                    >
                        {move || if pending.get() { "登录中..." } else { "登录" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
