// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════
mod field_view_tests {
    use crate::field_ref;
    use crate::field_view::*;
    use crate::pool::{Pool, PoolConfig};
    use crate::types::{Extension, ExtensionMap, FieldRef};
    use pretty_assertions::assert_eq;
    use std::num::NonZeroUsize;
    use std::ptr::NonNull;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Inner {
        id: u32,
        score: u64,
        label: String,
    }

    struct Message {
        opt16: Option<NonNull<u16>>,
        opt32: Option<NonNull<u32>>,
        opt64: Option<NonNull<u64>>,
        opt_bool: Option<NonNull<bool>>,
        opt_f64: Option<NonNull<f64>>,
        opt_i32: Option<NonNull<i32>>,
        ref16: u16,
        ref32: u32,
        ref64: u64,
        ref_bool: bool,
        name: Option<String>,
        title: String,
        blob: Option<Vec<u8>>,
        payload: Vec<u8>,
        tags: Vec<String>,
        chunks: Vec<Vec<u8>>,
        nums: Vec<u32>,
        flags: Vec<bool>,
        wide: Vec<u64>,
        child: Option<NonNull<u8>>,
        children: Vec<NonNull<u8>>,
        inner: Inner,
        items: RawSeq,
        ext: ExtensionMap,
    }

    impl Default for Message {
        fn default() -> Self {
            Self {
                opt16: None,
                opt32: None,
                opt64: None,
                opt_bool: None,
                opt_f64: None,
                opt_i32: None,
                ref16: 0,
                ref32: 0,
                ref64: 0,
                ref_bool: false,
                name: None,
                title: String::new(),
                blob: None,
                payload: Vec::new(),
                tags: Vec::new(),
                chunks: Vec::new(),
                nums: Vec::new(),
                flags: Vec::new(),
                wide: Vec::new(),
                child: None,
                children: Vec::new(),
                inner: Inner::default(),
                items: RawSeq::new(RecordLayout::of::<Inner>()),
                ext: ExtensionMap::default(),
            }
        }
    }

    fn small_pool(batch: usize) -> Pool {
        Pool::with_config(PoolConfig::uniform(NonZeroUsize::new(batch).unwrap()))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Record handle
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_handle_extent_is_record_size() {
        let mut msg = Message::default();
        let h = RecordHandle::new(&mut msg);
        assert_eq!(h.extent(), size_of::<Message>());
    }

    #[test]
    fn test_field_addr_is_base_plus_offset() {
        let mut msg = Message::default();
        let expected = std::ptr::addr_of_mut!(msg.ref32).cast::<u8>();
        let h = RecordHandle::new(&mut msg);
        let f = field_ref!(Message, ref32);
        assert_eq!(h.field_addr(f), expected);
        assert_eq!(
            h.field_addr(f) as usize,
            h.base().as_ptr() as usize + f.offset()
        );
    }

    #[test]
    fn test_field_refs_reused_across_records() {
        let f = field_ref!(Message, ref64);
        let mut records: Vec<Message> = (0..5).map(|_| Message::default()).collect();
        for (i, msg) in records.iter_mut().enumerate() {
            let h = RecordHandle::new(msg);
            unsafe { h.ref_word64(f).set(i as u64 * 11) };
        }
        for (i, msg) in records.iter().enumerate() {
            assert_eq!(msg.ref64, i as u64 * 11);
        }
    }

    #[test]
    fn test_record_reinterpret() {
        let mut msg = Message::default();
        msg.ref16 = 99;
        let mut h = RecordHandle::new(&mut msg);
        assert_eq!(unsafe { h.record::<Message>() }.ref16, 99);
        unsafe { h.record_mut::<Message>() }.ref16 = 100;
        assert_eq!(msg.ref16, 100);
    }

    #[test]
    fn test_sub_record_inline() {
        let mut msg = Message::default();
        {
            let h = RecordHandle::new(&mut msg);
            let inner = unsafe { h.sub_record(field_ref!(Message, inner), size_of::<Inner>()) };
            assert_eq!(inner.extent(), size_of::<Inner>());
            unsafe {
                inner.ref_word32(field_ref!(Inner, id)).set(17);
                inner.inline::<String>(field_ref!(Inner, label)).set("embedded".into());
            }
        }
        assert_eq!(msg.inner.id, 17);
        assert_eq!(msg.inner.label, "embedded");
    }

    #[test]
    fn test_offset_walks_inline_array() {
        let mut arr: [Inner; 3] = Default::default();
        {
            let h = RecordHandle::new(&mut arr);
            for i in 0..3 {
                let elem = unsafe { h.offset(i * size_of::<Inner>(), size_of::<Inner>()) };
                unsafe { elem.ref_word32(field_ref!(Inner, id)).set(i as u32 + 10) };
            }
        }
        assert_eq!(arr.map(|inner| inner.id), [10, 11, 12]);
    }

    #[test]
    fn test_reborrow_shares_record() {
        let mut msg = Message::default();
        let mut h = RecordHandle::new(&mut msg);
        {
            let short = h.reborrow();
            unsafe { short.ref_word16(field_ref!(Message, ref16)).set(5) };
        }
        assert_eq!(unsafe { h.ref_word16(field_ref!(Message, ref16)).get() }, 5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid FieldRef")]
    fn test_invalid_field_ref_caught_in_debug() {
        let mut msg = Message::default();
        let h = RecordHandle::new(&mut msg);
        let _ = unsafe { h.ref_word32(FieldRef::INVALID).get() };
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "past record extent")]
    fn test_out_of_extent_caught_in_debug() {
        let mut word = 0u32;
        let h = RecordHandle::new(&mut word);
        let _ = unsafe { h.ref_word64(FieldRef::new(0)).get() };
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "past record extent")]
    fn test_offset_past_extent_caught_in_debug() {
        let mut words = [0u32; 3];
        let h = RecordHandle::new(&mut words);
        let _ = unsafe { h.offset(12, 4) };
    }

    #[test]
    fn test_offset_to_last_element_allowed() {
        let mut words = [0u32, 0, 7];
        let h = RecordHandle::new(&mut words);
        let last = unsafe { h.offset(8, 4) };
        assert_eq!(unsafe { last.ref_word32(FieldRef::new(0)).get() }, 7);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Boxed-optional scalars
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_boxed_unset_then_set() {
        let mut pool = Pool::new();
        let mut msg = Message::default();
        let h = RecordHandle::new(&mut msg);
        unsafe {
            let f16 = field_ref!(Message, opt16);
            let f32_ = field_ref!(Message, opt32);
            let f64_ = field_ref!(Message, opt64);
            let fb = field_ref!(Message, opt_bool);

            assert!(h.word16(f16).is_nil());
            assert!(h.word32(f32_).is_nil());
            assert!(h.word64(f64_).is_nil());
            assert!(h.boxed::<bool>(fb).is_nil());
            assert_eq!(h.word32(f32_).get(), None);

            h.word16(f16).set(&mut pool, u16::MAX);
            h.word32(f32_).set(&mut pool, 0xdead_beef);
            h.word64(f64_).set(&mut pool, u64::MAX - 1);
            h.boxed::<bool>(fb).set(&mut pool, true);

            assert!(!h.word16(f16).is_nil());
            assert_eq!(h.word16(f16).get(), Some(u16::MAX));
            assert_eq!(h.word32(f32_).get(), Some(0xdead_beef));
            assert_eq!(h.word64(f64_).get(), Some(u64::MAX - 1));
            assert_eq!(h.boxed::<bool>(fb).get(), Some(true));
        }
    }

    #[test]
    fn test_boxed_zero_is_not_unset() {
        let mut pool = Pool::new();
        let mut msg = Message::default();
        let h = RecordHandle::new(&mut msg);
        let f = field_ref!(Message, opt32);
        unsafe {
            h.word32(f).set(&mut pool, 0);
            assert!(!h.word32(f).is_nil());
            assert_eq!(h.word32(f).get(), Some(0));
        }
    }

    #[test]
    fn test_boxed_signed_and_float() {
        let mut pool = Pool::new();
        let mut msg = Message::default();
        let h = RecordHandle::new(&mut msg);
        unsafe {
            h.boxed::<f64>(field_ref!(Message, opt_f64)).set(&mut pool, -1.5);
            h.boxed::<i32>(field_ref!(Message, opt_i32)).set(&mut pool, i32::MIN);
            assert_eq!(h.boxed::<f64>(field_ref!(Message, opt_f64)).get(), Some(-1.5));
            assert_eq!(h.boxed::<i32>(field_ref!(Message, opt_i32)).get(), Some(i32::MIN));
        }
        assert_eq!(pool.stats().words64.cells_handed_out, 1);
        assert_eq!(pool.stats().words32.cells_handed_out, 1);
    }

    #[test]
    fn test_boxed_reset_takes_fresh_cell() {
        let mut pool = small_pool(8);
        let mut msg = Message::default();
        {
            let h = RecordHandle::new(&mut msg);
            let f = field_ref!(Message, opt64);
            unsafe {
                h.word64(f).set(&mut pool, 1);
                h.word64(f).set(&mut pool, 2);
                assert_eq!(h.word64(f).get(), Some(2));
            }
        }
        assert_eq!(pool.stats().words64.cells_handed_out, 2);
    }

    #[test]
    fn test_boxed_clear() {
        let mut pool = Pool::new();
        let mut msg = Message::default();
        let h = RecordHandle::new(&mut msg);
        let f = field_ref!(Message, opt16);
        unsafe {
            h.word16(f).set(&mut pool, 3);
            h.word16(f).clear();
            assert!(h.word16(f).is_nil());
        }
    }

    #[test]
    fn test_boxed_values_survive_many_batches() {
        for n in [1usize, 2, 3, 4, 7, 100, 257] {
            let mut pool = small_pool(3);
            let mut records: Vec<Message> = (0..n).map(|_| Message::default()).collect();
            for (i, msg) in records.iter_mut().enumerate() {
                let h = RecordHandle::new(msg);
                unsafe {
                    h.word16(field_ref!(Message, opt16)).set(&mut pool, i as u16);
                    h.word32(field_ref!(Message, opt32)).set(&mut pool, i as u32 * 3);
                    h.word64(field_ref!(Message, opt64)).set(&mut pool, i as u64 * 7);
                    h.boxed::<bool>(field_ref!(Message, opt_bool)).set(&mut pool, i % 2 == 0);
                    assert_eq!(h.word32(field_ref!(Message, opt32)).get(), Some(i as u32 * 3));
                }
            }
            for (i, msg) in records.iter_mut().enumerate() {
                let h = RecordHandle::new(msg);
                unsafe {
                    assert_eq!(h.word16(field_ref!(Message, opt16)).get(), Some(i as u16));
                    assert_eq!(h.word32(field_ref!(Message, opt32)).get(), Some(i as u32 * 3));
                    assert_eq!(h.word64(field_ref!(Message, opt64)).get(), Some(i as u64 * 7));
                    assert_eq!(
                        h.boxed::<bool>(field_ref!(Message, opt_bool)).get(),
                        Some(i % 2 == 0)
                    );
                }
            }
            assert_eq!(pool.stats().words32.batches, n.div_ceil(3));
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Inline scalars
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_inline_words() {
        let mut msg = Message::default();
        {
            let h = RecordHandle::new(&mut msg);
            unsafe {
                assert_eq!(h.ref_word32(field_ref!(Message, ref32)).get(), 0);
                h.ref_word16(field_ref!(Message, ref16)).set(513);
                h.ref_word32(field_ref!(Message, ref32)).set(70_000);
                h.ref_word64(field_ref!(Message, ref64)).set(1 << 40);
                h.inline::<bool>(field_ref!(Message, ref_bool)).set(true);
                let old = h.ref_word32(field_ref!(Message, ref32)).replace(70_001);
                assert_eq!(old, 70_000);
            }
        }
        assert_eq!(msg.ref16, 513);
        assert_eq!(msg.ref32, 70_001);
        assert_eq!(msg.ref64, 1 << 40);
        assert!(msg.ref_bool);
    }

    #[test]
    fn test_inline_text_zero_copy() {
        let mut msg = Message::default();
        msg.title = "hello".to_string();
        let expected = msg.title.as_ptr();
        let h = RecordHandle::new(&mut msg);
        let view = unsafe { h.inline::<String>(field_ref!(Message, title)) };
        assert_eq!(view.as_str(), "hello");
        assert_eq!(view.as_str().as_ptr(), expected);
    }

    #[test]
    fn test_inline_bytes_mutation() {
        let mut msg = Message::default();
        {
            let h = RecordHandle::new(&mut msg);
            let mut view = unsafe { h.inline::<Vec<u8>>(field_ref!(Message, payload)) };
            view.as_mut().extend_from_slice(b"abc");
            assert_eq!(view.as_slice(), b"abc");
        }
        assert_eq!(msg.payload, b"abc");
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Optional buffers
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_optional_text() {
        let mut msg = Message::default();
        {
            let h = RecordHandle::new(&mut msg);
            let mut view = unsafe { h.text(field_ref!(Message, name)) };
            assert!(view.is_nil());
            assert_eq!(view.as_str(), None);
            view.set("Alice".to_string());
            assert!(!view.is_nil());
            assert_eq!(view.as_str(), Some("Alice"));
        }
        assert_eq!(msg.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_optional_empty_text_is_set() {
        let mut msg = Message::default();
        let h = RecordHandle::new(&mut msg);
        let mut view = unsafe { h.text(field_ref!(Message, name)) };
        view.set(String::new());
        assert!(!view.is_nil());
        assert_eq!(view.as_str(), Some(""));
    }

    #[test]
    fn test_optional_bytes_take() {
        let mut msg = Message::default();
        msg.blob = Some(vec![1, 2, 3]);
        let expected = msg.blob.as_ref().unwrap().as_ptr();
        let h = RecordHandle::new(&mut msg);
        let mut view = unsafe { h.bytes(field_ref!(Message, blob)) };
        assert_eq!(view.as_slice().unwrap().as_ptr(), expected);
        view.get_mut().unwrap().push(4);
        assert_eq!(view.take(), Some(vec![1, 2, 3, 4]));
        assert!(view.is_nil());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Nested records
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_nested_reference() {
        let mut child = Inner {
            id: 4,
            ..Inner::default()
        };
        let child_ptr = NonNull::from(&mut child).cast::<u8>();
        let mut msg = Message::default();
        {
            let h = RecordHandle::new(&mut msg);
            let mut view = unsafe { h.nested(field_ref!(Message, child)) };
            assert!(view.is_nil());
            assert!(unsafe { view.handle(size_of::<Inner>()) }.is_none());
            view.set(Some(child_ptr));
            assert_eq!(view.get(), Some(child_ptr));
            let nested = unsafe { view.handle(size_of::<Inner>()) }.unwrap();
            unsafe { nested.ref_word64(field_ref!(Inner, score)).set(1234) };
        }
        assert_eq!(msg.child, Some(child_ptr));
        assert_eq!(child.score, 1234);
        assert_eq!(child.id, 4);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Sequences
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_seq_append_len_index() {
        for k in 0..=100usize {
            let mut msg = Message::default();
            let h = RecordHandle::new(&mut msg);
            let mut nums = unsafe { h.seq::<u32>(field_ref!(Message, nums)) };
            assert!(nums.is_empty());
            for i in 0..k {
                nums.append(i as u32 * 2 + 1);
            }
            assert_eq!(nums.len(), k);
            assert!(nums.capacity() >= k);
            for i in 0..k {
                assert_eq!(*nums.index(i), i as u32 * 2 + 1);
            }
            assert_eq!(nums.get(k), None);
        }
    }

    #[test]
    fn test_seq_of_each_element_kind() {
        let mut msg = Message::default();
        {
            let h = RecordHandle::new(&mut msg);
            unsafe {
                let mut tags = h.seq::<String>(field_ref!(Message, tags));
                let mut chunks = h.seq::<Vec<u8>>(field_ref!(Message, chunks));
                let mut flags = h.seq::<bool>(field_ref!(Message, flags));
                let mut wide = h.seq::<u64>(field_ref!(Message, wide));
                let mut payload = h.seq::<u8>(field_ref!(Message, payload));
                for i in 0..50u64 {
                    tags.append(format!("t{i}"));
                    chunks.append(vec![i as u8; i as usize]);
                    flags.append(i % 3 == 0);
                    wide.append(u64::MAX - i);
                    payload.append(i as u8);
                }
                assert_eq!(tags.index(49), "t49");
                assert_eq!(chunks.index(10).len(), 10);
                assert!(*flags.index(3));
                assert_eq!(wide.as_slice()[0], u64::MAX);
                assert_eq!(
                    payload.iter().map(|b| u32::from(*b)).sum::<u32>(),
                    (0..50u32).sum::<u32>()
                );
            }
        }
        assert_eq!(msg.tags.len(), 50);
        assert_eq!(msg.chunks[49], vec![49u8; 49]);
        assert_eq!(msg.flags.iter().filter(|f| **f).count(), 17);
        assert_eq!(msg.payload.len(), 50);
    }

    #[test]
    fn test_seq_truncate() {
        let mut msg = Message::default();
        msg.nums = vec![1, 2, 3, 4];
        let h = RecordHandle::new(&mut msg);
        let mut nums = unsafe { h.seq::<u32>(field_ref!(Message, nums)) };
        nums.truncate(2);
        assert_eq!(nums.as_slice(), &[1, 2]);
        nums.as_mut_slice()[0] = 9;
        assert_eq!(nums.as_slice(), &[9, 2]);
    }

    #[test]
    #[should_panic]
    fn test_seq_index_out_of_range_panics() {
        let mut msg = Message::default();
        let h = RecordHandle::new(&mut msg);
        let nums = unsafe { h.seq::<u32>(field_ref!(Message, nums)) };
        let _ = nums.index(0);
    }

    #[test]
    fn test_record_refs() {
        let mut children: Vec<Inner> = (0..10)
            .map(|i| Inner {
                id: i,
                ..Inner::default()
            })
            .collect();
        let mut msg = Message::default();
        {
            let h = RecordHandle::new(&mut msg);
            let mut refs = unsafe { h.record_refs(field_ref!(Message, children)) };
            for child in children.iter_mut() {
                refs.append(NonNull::from(child).cast::<u8>());
            }
            assert_eq!(refs.len(), 10);
            for i in 0..10 {
                let child = unsafe { refs.record(i, size_of::<Inner>()) };
                let id = unsafe { child.ref_word32(field_ref!(Inner, id)) };
                assert_eq!(id.get(), i as u32);
            }
            let last = unsafe { refs.record(9, size_of::<Inner>()) };
            unsafe { last.ref_word64(field_ref!(Inner, score)).set(99) };
        }
        assert_eq!(msg.children.len(), 10);
        drop(msg);
        // The array only held references: the records themselves are intact.
        assert_eq!(children[9].score, 99);
        assert_eq!(children[3].id, 3);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Raw record sequences
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_raw_seq_append_records() {
        for k in [0usize, 1, 4, 5, 33, 100] {
            let mut msg = Message::default();
            {
                let h = RecordHandle::new(&mut msg);
                let mut items = unsafe { h.raw_seq(field_ref!(Message, items)) };
                let items = items.as_mut();
                for i in 0..k {
                    let elem = items.append_record();
                    assert_eq!(elem.extent(), size_of::<Inner>());
                    unsafe {
                        assert_eq!(elem.ref_word32(field_ref!(Inner, id)).get(), 0);
                        elem.ref_word32(field_ref!(Inner, id)).set(i as u32);
                        elem.inline::<String>(field_ref!(Inner, label)).set(format!("item{i}"));
                    }
                }
                assert_eq!(items.len(), k);
                assert!(items.capacity() >= k);
                for i in 0..k {
                    let elem = items.index(i);
                    assert_eq!(unsafe { elem.ref_word32(field_ref!(Inner, id)).get() }, i as u32);
                }
                assert!(items.get(k).is_none());
            }
            let slice = unsafe { msg.items.as_slice::<Inner>() };
            assert_eq!(slice.len(), k);
            for (i, item) in slice.iter().enumerate() {
                assert_eq!(item.id, i as u32);
                assert_eq!(item.label, format!("item{i}"));
            }
        }
    }

    #[test]
    fn test_raw_seq_zeroed_layout() {
        #[derive(Clone, Copy)]
        struct Pair {
            a: u64,
            b: u32,
        }
        let layout = unsafe { RecordLayout::zeroed(std::alloc::Layout::new::<Pair>()) };
        assert_eq!(layout.size(), size_of::<Pair>());
        let mut seq = RawSeq::new(layout);
        for i in 0..20u64 {
            let elem = seq.append_record();
            unsafe {
                assert_eq!(elem.ref_word64(field_ref!(Pair, a)).get(), 0);
                elem.ref_word64(field_ref!(Pair, a)).set(i);
                elem.ref_word32(field_ref!(Pair, b)).set(i as u32 + 1);
            }
        }
        let pairs = unsafe { seq.as_slice::<Pair>() };
        assert_eq!(pairs.len(), 20);
        assert!(pairs.iter().enumerate().all(|(i, p)| p.a == i as u64 && p.b == i as u32 + 1));
    }

    #[test]
    fn test_raw_seq_clear_keeps_capacity() {
        let mut seq = RawSeq::new(RecordLayout::of::<Inner>());
        for _ in 0..6 {
            seq.append_record();
        }
        let cap = seq.capacity();
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.capacity(), cap);
        seq.append_record();
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_raw_seq_zero_sized_elements() {
        let mut seq = RawSeq::new(RecordLayout::of::<()>());
        for _ in 0..10 {
            seq.append_record();
        }
        assert_eq!(seq.len(), 10);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_raw_seq_index_out_of_range_panics() {
        let mut seq = RawSeq::new(RecordLayout::of::<Inner>());
        seq.append_record();
        let _ = seq.index(1);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Extensions
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_extension_map() {
        let mut msg = Message::default();
        {
            let h = RecordHandle::new(&mut msg);
            let mut ext = unsafe { h.ext_map(field_ref!(Message, ext)) };
            ext.as_mut().insert(100, Extension::new(vec![8, 1]));
            assert_eq!(ext.as_ref().len(), 1);
        }
        assert_eq!(msg.ext.get(&100).map(Extension::encoded), Some(&[8u8, 1][..]));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Record copy
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_copy_bytes_sizes() {
        for n in [0usize, 1, 16, 4096] {
            let mut src = [0u8; 4096];
            for (i, b) in src.iter_mut().enumerate() {
                *b = (i * 31 % 251) as u8;
            }
            let snapshot = src;
            let mut dst = [0xffu8; 4096];
            {
                let s = RecordHandle::new(&mut src);
                let d = RecordHandle::new(&mut dst);
                unsafe { copy_bytes(&s, &d, n) };
            }
            assert_eq!(&dst[..n], &snapshot[..n]);
            assert!(dst[n..].iter().all(|b| *b == 0xff));
        }
    }

    #[test]
    fn test_copy_onto_self_is_noop() {
        let mut buf = [7u8; 32];
        {
            let h = RecordHandle::new(&mut buf);
            unsafe { copy_bytes(&h, &h, 32) };
        }
        assert_eq!(buf, [7u8; 32]);
    }

    #[test]
    fn test_copy_plain_record() {
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        struct Point {
            x: u32,
            y: u64,
            z: bool,
        }
        let mut a = Point { x: 1, y: 2, z: true };
        let mut b = Point::default();
        {
            let src = RecordHandle::new(&mut a);
            let dst = RecordHandle::new(&mut b);
            unsafe { dst.copy_from(&src, size_of::<Point>()) };
        }
        assert_eq!(a, b);
    }
}
