//! The fixed catalog of 28 lunar mansions (二十八宿).
//!
//! Records are addressed by [`ConstellationId`], which is dense over
//! `0..28`: the id of every record equals its position in [`all`]. The table
//! is compiled in and never changes at runtime.

use serde::Serialize;

use crate::constants::CATALOG_SIZE;
use crate::error::CatalogError;
use crate::types::{ConstellationId, Direction};

/// One destiny record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: ConstellationId,
    /// Single-mansion name, e.g. `角宿`.
    pub short_name: &'static str,
    /// Full traditional name (mansion + luminary + beast), e.g. `角木蛟`.
    pub full_name: &'static str,
    pub direction: Direction,
    /// One of the seven luminaries (七曜).
    pub element: &'static str,
    pub animal: &'static str,
    pub poem: &'static str,
    pub fortune: &'static str,
    /// Relative path of the card artwork.
    pub image_ref: &'static str,
}

#[allow(clippy::too_many_arguments)]
const fn mansion(
    id: u8,
    short_name: &'static str,
    full_name: &'static str,
    direction: Direction,
    element: &'static str,
    animal: &'static str,
    poem: &'static str,
    fortune: &'static str,
    image_ref: &'static str,
) -> CatalogRecord {
    CatalogRecord {
        id: ConstellationId(id),
        short_name,
        full_name,
        direction,
        element,
        animal,
        poem,
        fortune,
        image_ref,
    }
}

use Direction::{East, North, South, West};

#[rustfmt::skip]
static CATALOG: [CatalogRecord; CATALOG_SIZE] = [
    // -- East: Azure Dragon --
    mansion(0, "角宿", "角木蛟", East, "木", "蛟",
        "苍龙昂首角初明，春雷一动万物生。",
        "开局之星，敢为人先。来年宜开创新局，主动出击。",
        "images/mansions/00-jiao.png"),
    mansion(1, "亢宿", "亢金龙", East, "金", "龙",
        "龙颈高昂对紫宸，刚正不阿守其真。",
        "性情刚直，处事公正。来年贵人相助，宜坚持原则。",
        "images/mansions/01-kang.png"),
    mansion(2, "氐宿", "氐土貉", East, "土", "貉",
        "根深叶茂本为基，厚积方能薄发时。",
        "根基稳固，踏实可靠。来年宜深耕细作，稳中求进。",
        "images/mansions/02-di.png"),
    mansion(3, "房宿", "房日兔", East, "日", "兔",
        "天驷驰光照四方，房心一脉满华堂。",
        "福星高照，家宅兴旺。来年财运亨通，宜广结善缘。",
        "images/mansions/03-fang.png"),
    mansion(4, "心宿", "心月狐", East, "月", "狐",
        "大火流辉夜未央，灵思一点胜千章。",
        "心思灵巧，洞察入微。来年宜发挥创意，以智取胜。",
        "images/mansions/04-xin.png"),
    mansion(5, "尾宿", "尾火虎", East, "火", "虎",
        "九子连珠龙尾长，虎威烈烈照八荒。",
        "坚韧不拔，善始善终。来年宜迎难而上，收获颇丰。",
        "images/mansions/05-wei.png"),
    mansion(6, "箕宿", "箕水豹", East, "水", "豹",
        "箕星好风送扁舟，豹隐南山志未休。",
        "乘风而行，眼界开阔。来年宜远行拓展，机遇自来。",
        "images/mansions/06-ji.png"),
    // -- North: Black Tortoise --
    mansion(7, "斗宿", "斗木獬", North, "木", "獬",
        "南斗司生注福长，獬豸明辨正朝纲。",
        "明辨是非，福寿绵长。来年宜担当重任，众望所归。",
        "images/mansions/07-dou.png"),
    mansion(8, "牛宿", "牛金牛", North, "金", "牛",
        "牵牛河畔望星桥，勤耕不负好春朝。",
        "勤勉务实，厚德载物。来年耕耘必有回报。",
        "images/mansions/08-niu.png"),
    mansion(9, "女宿", "女土蝠", North, "土", "蝠",
        "婺女织云夜未眠，蝠临门户福绵绵。",
        "心灵手巧，细致周全。来年福气临门，宜精益求精。",
        "images/mansions/09-nv.png"),
    mansion(10, "虚宿", "虚日鼠", North, "日", "鼠",
        "虚怀若谷纳百川，机敏如鼠探先机。",
        "虚怀若谷，机敏过人。来年宜谦逊求学，厚积薄发。",
        "images/mansions/10-xu.png"),
    mansion(11, "危宿", "危月燕", North, "月", "燕",
        "危楼高百尺，燕子报春归。",
        "居安思危，轻盈灵动。来年宜未雨绸缪，化险为夷。",
        "images/mansions/11-wei.png"),
    mansion(12, "室宿", "室火猪", North, "火", "猪",
        "营室星辉暖万家，丰年瑞雪兆光华。",
        "安居乐业，家和事兴。来年宜筑巢立业，福满华堂。",
        "images/mansions/12-shi.png"),
    mansion(13, "壁宿", "壁水貐", North, "水", "貐",
        "东壁图书府，文星耀九州。",
        "博学多才，文运昌隆。来年宜读书进修，一鸣惊人。",
        "images/mansions/13-bi.png"),
    // -- West: White Tiger --
    mansion(14, "奎宿", "奎木狼", West, "木", "狼",
        "奎星主文章，狼啸月下光。",
        "文武兼备，才思敏捷。来年宜展露锋芒，名声远扬。",
        "images/mansions/14-kui.png"),
    mansion(15, "娄宿", "娄金狗", West, "金", "狗",
        "娄星聚众养牺牲，忠义当先守太平。",
        "忠诚可靠，善于聚众。来年宜团队协作，事半功倍。",
        "images/mansions/15-lou.png"),
    mansion(16, "胃宿", "胃土雉", West, "土", "雉",
        "天仓满廪五谷丰，雉鸣原上庆年登。",
        "仓廪充实，衣食无忧。来年财库丰盈，宜稳健理财。",
        "images/mansions/16-wei.png"),
    mansion(17, "昴宿", "昴日鸡", West, "日", "鸡",
        "昴星团聚似珠联，金鸡一唱晓光天。",
        "守时守信，光明磊落。来年宜早作规划，闻鸡起舞，更上层楼。",
        "images/mansions/17-mao.png"),
    mansion(18, "毕宿", "毕月乌", West, "月", "乌",
        "月离于毕俾滂沱，乌鹊南飞润山河。",
        "善解人意，润物无声。来年人缘极佳，宜广交朋友。",
        "images/mansions/18-bi.png"),
    mansion(19, "觜宿", "觜火猴", West, "火", "猴",
        "觜觿虽小锋芒现，灵猴跃处彩云间。",
        "聪慧灵动，口才出众。来年宜表达自我，脱颖而出。",
        "images/mansions/19-zi.png"),
    mansion(20, "参宿", "参水猿", West, "水", "猿",
        "参横斗转夜将阑，猿啸长空意自宽。",
        "光芒璀璨，志存高远。来年宜放眼长远，大展宏图。",
        "images/mansions/20-shen.png"),
    // -- South: Vermilion Bird --
    mansion(21, "井宿", "井木犴", South, "木", "犴",
        "东井八星汲清泉，法度森严保平安。",
        "清正廉明，源源不断。来年宜守正出奇，财源广进。",
        "images/mansions/21-jing.png"),
    mansion(22, "鬼宿", "鬼金羊", South, "金", "羊",
        "舆鬼积尸气如烟，金羊温婉解忧烦。",
        "外柔内刚，洞悉人心。来年宜静观其变，谋定后动。",
        "images/mansions/22-gui.png"),
    mansion(23, "柳宿", "柳土獐", South, "土", "獐",
        "柳星垂露润春泥，獐鹿悠然过小溪。",
        "温和柔韧，随遇而安。来年宜顺势而为，好运连连。",
        "images/mansions/23-liu.png"),
    mansion(24, "星宿", "星日马", South, "日", "马",
        "七星如带耀南天，天马行空自在旋。",
        "热情奔放，行动迅捷。来年宜快马加鞭，马到成功。",
        "images/mansions/24-xing.png"),
    mansion(25, "张宿", "张月鹿", South, "月", "鹿",
        "张星展翼宴嘉宾，福鹿衔芝寿禄臻。",
        "热情好客，福禄双全。来年宜广开门路，喜事连连。",
        "images/mansions/25-zhang.png"),
    mansion(26, "翼宿", "翼火蛇", South, "火", "蛇",
        "翼宿翩翩乐府声，灵蛇腾雾上青冥。",
        "多才多艺，韬光养晦。来年宜蓄势待发，一飞冲天。",
        "images/mansions/26-yi.png"),
    mansion(27, "轸宿", "轸水蚓", South, "水", "蚓",
        "轸星驾车行万里，蚓耕深土润无声。",
        "脚踏实地，稳步前行。来年宜长途跋涉，终达彼岸。",
        "images/mansions/27-zhen.png"),
];

/// All records, in id order.
pub fn all() -> &'static [CatalogRecord] {
    &CATALOG
}

/// Look up a record by id. `None` for ids outside the catalog.
pub fn get(id: ConstellationId) -> Option<&'static CatalogRecord> {
    CATALOG.get(id.index())
}

pub fn by_id(id: ConstellationId) -> Result<&'static CatalogRecord, CatalogError> {
    get(id).ok_or(CatalogError::UnknownConstellation(id.0))
}
