pub mod char_set;
pub mod combinators;
pub mod core;
pub mod memo;
pub mod prelude;
pub mod resolve;

pub use self::core::Input;
pub use self::core::Mode;
pub use self::core::NoMatch;
pub use self::core::ParseResult;
pub use self::core::Parser;
pub use self::core::Span;
