use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{Question, QuestionSource};
use quiz_core::time::fixed_now;
use services::{
    Clock, LocalProvider, QuestionProvider, QuestionSourceError, QuestionSources,
    QuizLoopService, ResultsService,
};
use storage::repository::Storage;

use crate::app::{Screen, Screens};
use crate::context::{UiApp, build_app_context};

#[derive(Clone)]
struct TestApp {
    initial_source: QuestionSource,
    quiz_loop: Arc<QuizLoopService>,
    results: Arc<ResultsService>,
}

impl UiApp for TestApp {
    fn initial_source(&self) -> QuestionSource {
        self.initial_source
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }
}

/// Remote source that is always down.
pub struct UnreachableRemote;

#[async_trait]
impl QuestionProvider for UnreachableRemote {
    async fn fetch_batch(&self, _amount: usize) -> Result<Vec<Question>, QuestionSourceError> {
        Err(QuestionSourceError::MalformedResponse(
            "connection refused".to_string(),
        ))
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    screen: Screen,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { Screens { initial: props.screen } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(screen: Screen, initial_source: QuestionSource) -> ViewHarness {
    setup_view_harness_with(
        screen,
        initial_source,
        Storage::in_memory(),
        Arc::new(UnreachableRemote),
    )
}

pub fn setup_view_harness_with(
    screen: Screen,
    initial_source: QuestionSource,
    storage: Storage,
    remote: Arc<dyn QuestionProvider>,
) -> ViewHarness {
    let sources = QuestionSources::new(remote, Arc::new(LocalProvider::bundled()));
    let quiz_loop = Arc::new(QuizLoopService::new(
        Clock::fixed(fixed_now()),
        sources,
        storage.best_score(),
        storage.results(),
    ));
    let results = Arc::new(ResultsService::new(storage.results()));

    let app = Arc::new(TestApp {
        initial_source,
        quiz_loop,
        results,
    });

    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app, screen });

    ViewHarness { dom, storage }
}
