mod region_code;
mod video;

pub use region_code::RegionCode;
pub use video::VideoRecord;
