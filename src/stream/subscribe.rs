use async_stream::stream;
use futures::{
    stream::{BoxStream, Stream, StreamExt},
    FutureExt,
};
use tracing::trace;

use super::{DataStream, Signal, SignalReceiver};

/// Подписка на канал с семантикой «побеждает последний сигнал».
///
/// Реализуется для любого [`DataStream`], включая `dyn DataStream`.
pub trait DataStreamExt: DataStream {
    /// Возвращает новый ленивый бесконечный поток.
    ///
    /// При первом опросе `project` запускается на буферизованном сигнале.
    /// Если во время работы проекции приходит новый сигнал, текущая
    /// проекция отбрасывается (вместе со всем, что она держала) и
    /// перезапускается с начала. Элементы отброшенной проекции наружу не
    /// попадают.
    ///
    /// Ошибки проекции являются обычными элементами потока (как правило, `Result`) и
    /// видны только этой подписке. Уничтожение потока отменяет только эту
    /// подписку.
    fn subscribe<T, F, S>(
        &self,
        project: F,
    ) -> BoxStream<'static, T>
    where
        T: Send + 'static,
        F: FnMut(Signal) -> S + Send + 'static,
        S: Stream<Item = T> + Send + 'static,
    {
        transform_latest(self.signals(), project).boxed()
    }
}

impl<D: DataStream + ?Sized> DataStreamExt for D {}

enum Step<T> {
    Signal(Option<Signal>),
    Item(Option<T>),
}

/// Запускает `project` на каждом сигнале из `signals`, вытесняя
/// незавершённый запуск при появлении нового сигнала.
///
/// Поток завершается, когда канал закрыт и последняя проекция отработала.
pub fn transform_latest<T, F, S>(
    mut signals: SignalReceiver,
    mut project: F,
) -> impl Stream<Item = T> + Send + 'static
where
    T: Send + 'static,
    F: FnMut(Signal) -> S + Send + 'static,
    S: Stream<Item = T> + Send + 'static,
{
    stream! {
        let Some(mut signal) = signals.recv().await else {
            return;
        };
        let mut open = true;

        loop {
            trace!(generation = signal.generation(), "Running projection");
            let mut inner = Box::pin(project(signal));
            let mut preempted_by = None;

            loop {
                // biased: новый сигнал проверяется раньше очередного элемента,
                // чтобы устаревшая проекция не успела ничего выдать.
                let step = tokio::select! {
                    biased;
                    next = signals.recv(), if open => Step::Signal(next),
                    item = inner.next() => Step::Item(item),
                };

                match step {
                    Step::Signal(Some(next)) => {
                        preempted_by = Some(next);
                        break;
                    }
                    Step::Signal(None) => open = false,
                    Step::Item(Some(item)) => yield item,
                    Step::Item(None) => break,
                }
            }
            drop(inner);

            signal = match preempted_by {
                Some(next) => {
                    trace!(
                        abandoned = signal.generation(),
                        generation = next.generation(),
                        "Projection preempted"
                    );
                    next
                }
                None if open => match signals.recv().await {
                    Some(next) => next,
                    None => return,
                },
                None => return,
            };
        }
    }
}

/// Проекция из одного асинхронного вычисления.
///
/// Удобно для типичного случая «на каждый сигнал один запрос к серверу».
pub fn once_per_signal<T, F, Fut>(
    mut fetch: F
) -> impl FnMut(Signal) -> futures::stream::Once<futures::future::BoxFuture<'static, T>>
where
    F: FnMut(Signal) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = T> + Send + 'static,
{
    move |signal| futures::stream::once(fetch(signal).boxed())
}
