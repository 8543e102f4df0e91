// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Railyard Model
//!
//! The static side of a railyard scheduling problem: the station/track
//! network, the goods that need transporting, and the plan that comes out of
//! the scheduler.
//!
//! Module map
//! - `index`: typed indices for stations, edges, lanes and goods.
//! - `network`: stations, edges, adjacency and the `NetworkBuilder`.
//! - `good`: shipments and their optional waypoints.
//! - `instance`: a network together with its goods.
//! - `loading`: the line oriented instance reader.
//! - `route`: the committed `(edge, lane)` sequence of a single good.
//! - `plan`: routes for all goods in processing order.
//! - `report`: the failure aggregate and the textual output format.

pub mod good;
pub mod index;
pub mod instance;
pub mod loading;
pub mod network;
pub mod plan;
pub mod report;
pub mod route;
