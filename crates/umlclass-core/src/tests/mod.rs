mod encode;
mod resolve;
