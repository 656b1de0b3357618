//! Domain layer
//! 엔드포인트/버전 토큰/추출 규칙/좌표 템플릿을 네트워크와 무관하게 표현한다.

pub mod coordinate;
pub mod endpoint;
pub mod extract;
pub mod token;

pub use coordinate::CoordinateTemplate;
pub use endpoint::{Endpoint, EndpointError};
pub use extract::{ExtractMode, ShapeError};
pub use token::{TOKEN_LEN, VersionToken};
