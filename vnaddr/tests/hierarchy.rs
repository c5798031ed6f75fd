// Hierarchy laws: output triples are always containment-consistent,
// and comma-segment order does not matter when each segment names its
// level unambiguously.

mod common;

use vnaddr::normalize;

#[test]
fn output_triples_are_consistent() {
    let resolver = common::resolver();
    let inputs = [
        "xa loNG BinH HUyEn Go cOng tAY, tinH iEn GIANG",
        "X.Nga Thanh hyện Nga son TỉnhThanhQ Hóa",
        "Phường Phú Mỹ, Thà6nh phố Thủ Dầu Một, TBình Dương",
        "Phúc Xá, Ba Đình, Hà Nội",
        "xA hoa TinH, huYEN MaNg thiT, Tinh viN Long",
    ];
    for input in inputs {
        let got = resolver.resolve(input);
        if !got.ward.is_empty() && !got.district.is_empty() && !got.province.is_empty() {
            assert!(
                resolver.reference().ward_in_district(
                    &normalize(&got.ward),
                    &normalize(&got.province),
                    &normalize(&got.district)
                ),
                "inconsistent triple {got:?} for {input:?}"
            );
        }
    }
}

#[test]
fn segment_order_does_not_matter() {
    let resolver = common::resolver();
    let parts = ["Xã Nga Thạnh", "Huyện Nga Sơn", "Tỉnh Thanh Hóa"];
    let orders: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let expected = resolver.resolve(&parts.join(", "));
    assert_eq!(expected.ward, "Nga Thạnh");
    assert_eq!(expected.district, "Nga Sơn");
    assert_eq!(expected.province, "Thanh Hóa");
    for order in orders {
        let input = format!("{}, {}, {}", parts[order[0]], parts[order[1]], parts[order[2]]);
        assert_eq!(resolver.resolve(&input), expected, "order {order:?} diverged");
    }
}

#[test]
fn district_of_wrong_province_is_refused() {
    let resolver = common::resolver();
    // Nga Sơn belongs to Thanh Hóa; paired with Hà Nội it must lose.
    let got = resolver.resolve("Huyện Nga Sơn, Tỉnh Hà Nội");
    assert_eq!(got.province, "Hà Nội");
    assert_eq!(got.district, "");
}

#[test]
fn ward_limited_to_admitted_district() {
    let resolver = common::resolver();
    // Phúc Xá is under Ba Đình, not under Nga Sơn.
    let got = resolver.resolve("Phường Phúc Xá, Huyện Nga Sơn, Tỉnh Thanh Hóa");
    assert_eq!(got.province, "Thanh Hóa");
    assert_eq!(got.district, "Nga Sơn");
    assert_eq!(got.ward, "");
}
