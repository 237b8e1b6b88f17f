use crate::Payload;

/// Producer invoked once per tick.
///
/// Any `FnMut() -> P` closure where `P: Into<Payload>` is a source, so tests
/// and the demo binary can inject a counter or a noise generator without a
/// dedicated type.
pub trait ValueSource: Send + 'static {
    fn next_payload(&mut self) -> Payload;
}

impl<F, P> ValueSource for F
where
    F: FnMut() -> P + Send + 'static,
    P: Into<Payload>,
{
    fn next_payload(&mut self) -> Payload {
        (self)().into()
    }
}
