// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stand-in decoding engine for tests, written in WebAssembly text.
//!
//! "Decoding" is a scan for any pixel darker than 128. When one is found the
//! single entry point answers with a QR record and the multi entry point with
//! a QR record followed by an EAN-13 record. A 1x1 image makes the engine
//! throw through the host shim.
//!
//! Responses are copied into buffers from the engine's own allocator, which
//! keeps a count of live allocations at [`LIVE_ALLOCATIONS_PTR`]. Each decode
//! call records the filter flag and hints it was given.

pub(crate) const RECORD_QR: &str = r#"{"format":11,"text":"hello","raw_bytes":[64,86,134],"num_bits":24,"points":[1.5,2.5,10.0,2.5,10.0,12.0],"metadata":[["Error_Correction_Level","L"],["Orientation",0]],"timestamp":1700000000000}"#;

pub(crate) const RECORD_EAN: &str = r#"{"format":7,"text":"5901234123457","raw_bytes":[],"num_bits":95,"points":[3.0,40.0,60.0,40.0],"metadata":[["Symbology_Identifier","]E0"]],"timestamp":1700000000001}"#;

pub(crate) const NOT_FOUND: &str = "not found";

/// `i32` count of buffers handed out by `allocate` and not yet deallocated.
pub(crate) const LIVE_ALLOCATIONS_PTR: i32 = 0;
/// `i32` filter flag of the last decode call; -1 before the first call.
pub(crate) const LAST_FILTER_PTR: i32 = 4;
/// `i32` hints length of the last decode call.
pub(crate) const LAST_HINTS_LEN_PTR: i32 = 8;
/// Copy of the last hints JSON, when it fits in 256 bytes.
pub(crate) const LAST_HINTS_PTR: i32 = 512;
pub(crate) const THROWN: &str = "engine exploded";

fn wat_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// WAT source importing its callbacks from `namespace` and exporting its
/// installer as `installer`.
pub(crate) fn engine_wat(namespace: &str, installer: &str) -> String {
    let single_found = format!(r#"{{"ok":{RECORD_QR}}}"#);
    let single_empty = format!(r#"{{"not_found":"{NOT_FOUND}"}}"#);
    let multi_found = format!(r#"{{"ok":[{RECORD_QR},{RECORD_EAN}]}}"#);
    let multi_empty = r#"{"not_found":"no barcodes"}"#.to_string();

    format!(
        r#"
(module
  (import "{namespace}" "__wbg_log" (func $log (param i32 i32)))
  (import "{namespace}" "__wbindgen_throw" (func $throw (param i32 i32)))
  (memory (export "memory") 4)
  (global $heap (mut i32) (i32.const 32768))
  (global $installed (mut i32) (i32.const 0))
  (data (i32.const {last_filter}) "\ff\ff\ff\ff")
  (data (i32.const 256) "installed")
  (data (i32.const 384) "{thrown}")
  (data (i32.const 1024) "{sf}")
  (data (i32.const 8192) "{se}")
  (data (i32.const 12288) "{mf}")
  (data (i32.const 24576) "{me}")

  (func (export "{installer}")
    (global.set $installed (i32.const 1))
    (call $log (i32.const 256) (i32.const 9)))

  (func $allocate (export "allocate") (param $size i32) (result i32)
    (local $ptr i32)
    (local.set $ptr (global.get $heap))
    (global.set $heap (i32.add (global.get $heap) (local.get $size)))
    (i32.store (i32.const {live}) (i32.add (i32.load (i32.const {live})) (i32.const 1)))
    (local.get $ptr))

  (func (export "deallocate") (param $ptr i32) (param $size i32)
    (i32.store (i32.const {live}) (i32.sub (i32.load (i32.const {live})) (i32.const 1))))

  (func $capture (param $hints i32) (param $hints_len i32) (param $filter i32)
    (i32.store (i32.const {last_filter}) (local.get $filter))
    (i32.store (i32.const {last_hints_len}) (local.get $hints_len))
    (if (i32.le_u (local.get $hints_len) (i32.const 256))
      (then (memory.copy (i32.const {last_hints}) (local.get $hints) (local.get $hints_len)))))

  (func $has_dark (param $ptr i32) (param $len i32) (result i32)
    (local $end i32)
    (local.set $end (i32.add (local.get $ptr) (local.get $len)))
    (block $done
      (loop $scan
        (br_if $done (i32.ge_u (local.get $ptr) (local.get $end)))
        (if (i32.lt_u (i32.load8_u (local.get $ptr)) (i32.const 128))
          (then (return (i32.const 1))))
        (local.set $ptr (i32.add (local.get $ptr) (i32.const 1)))
        (br $scan)))
    (i32.const 0))

  (func $respond (param $out_len_ptr i32) (param $src i32) (param $len i32) (result i32)
    (local $ptr i32)
    (local.set $ptr (call $allocate (local.get $len)))
    (memory.copy (local.get $ptr) (local.get $src) (local.get $len))
    (i32.store (local.get $out_len_ptr) (local.get $len))
    (local.get $ptr))

  (func $guard (param $width i32) (param $height i32)
    (if (i32.eqz (global.get $installed)) (then unreachable))
    (if (i32.and
          (i32.eq (local.get $width) (i32.const 1))
          (i32.eq (local.get $height) (i32.const 1)))
      (then (call $throw (i32.const 384) (i32.const {thrown_len})))))

  (func (export "decode_barcode")
    (param $luma i32) (param $luma_len i32) (param $width i32) (param $height i32)
    (param $hints i32) (param $hints_len i32) (param $filter i32) (param $out i32)
    (result i32)
    (call $capture (local.get $hints) (local.get $hints_len) (local.get $filter))
    (call $guard (local.get $width) (local.get $height))
    (if (result i32) (call $has_dark (local.get $luma) (local.get $luma_len))
      (then (call $respond (local.get $out) (i32.const 1024) (i32.const {sf_len})))
      (else (call $respond (local.get $out) (i32.const 8192) (i32.const {se_len})))))

  (func (export "decode_multi")
    (param $luma i32) (param $luma_len i32) (param $width i32) (param $height i32)
    (param $hints i32) (param $hints_len i32) (param $filter i32) (param $out i32)
    (result i32)
    (call $capture (local.get $hints) (local.get $hints_len) (local.get $filter))
    (call $guard (local.get $width) (local.get $height))
    (if (result i32) (call $has_dark (local.get $luma) (local.get $luma_len))
      (then (call $respond (local.get $out) (i32.const 12288) (i32.const {mf_len})))
      (else (call $respond (local.get $out) (i32.const 24576) (i32.const {me_len}))))))
"#,
        live = LIVE_ALLOCATIONS_PTR,
        last_filter = LAST_FILTER_PTR,
        last_hints_len = LAST_HINTS_LEN_PTR,
        last_hints = LAST_HINTS_PTR,
        thrown = wat_escape(THROWN),
        thrown_len = THROWN.len(),
        sf = wat_escape(&single_found),
        sf_len = single_found.len(),
        se = wat_escape(&single_empty),
        se_len = single_empty.len(),
        mf = wat_escape(&multi_found),
        mf_len = multi_found.len(),
        me = wat_escape(&multi_empty),
        me_len = multi_empty.len(),
    )
}

pub(crate) fn engine_bytes(namespace: &str, installer: &str) -> Vec<u8> {
    wat::parse_str(engine_wat(namespace, installer)).expect("test engine WAT is valid")
}
