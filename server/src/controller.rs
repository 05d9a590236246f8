use std::future::IntoFuture;

// Adapted from https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
pub trait TryIntake<I>: 'static + Sync + Send {
    type To;
    type Error;
    fn emit(&self, input: I) -> Result<Self::To, Self::Error>;
}

pub trait Exhaust<O>: 'static + Sync + Send {
    type To;
    fn emit(&self, output: O) -> Self::To;
}

/// Request pipeline: the transformer turns raw input into a service DTO,
/// the presenter turns the service output into a response.
pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn try_intake<I>(
        self,
        input: I,
    ) -> Result<Transformed<P, <T as TryIntake<I>>::To>, <T as TryIntake<I>>::Error>
    where
        T: TryIntake<I>,
    {
        Ok(Transformed {
            transformed: self.transformer.emit(input)?,
            presenter: self.presenter,
        })
    }
}

impl<P> Controller<(), P> {
    pub async fn bypass<F, Fut, O, E>(self, f: F) -> Result<<P as Exhaust<O>>::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f().await?))
    }
}

pub struct Transformed<P, D> {
    transformed: D,
    presenter: P,
}

impl<P, D> Transformed<P, D> {
    pub async fn handle<F, Fut, O, E>(self, f: F) -> Result<<P as Exhaust<O>>::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f(self.transformed).await?))
    }
}
